use std::cell::RefCell;
use std::rc::Rc;

use strum_macros::{AsRefStr, Display, EnumString};
use web_sys::{Document, Element};
use yew::{platform::spawn_local, AppHandle, AttrValue, Callback, Renderer};

use crate::components::composite::notification_banner::{NotificationBanner, Props};
use crate::config::NOTIFICATION_TIMEOUT_MS;
use crate::dom;
use crate::error::DomError;
use crate::timer::{BrowserScheduler, ScheduledTask, Scheduler};

/// Bootstrap alert contextual class suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Severity {
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    #[default]
    Info,
    Light,
    Dark,
}

pub const NOTIFICATION_STYLE: &str = "top: 20px; right: 20px; z-index: 9999; min-width: 300px;";

pub fn alert_classes(severity: Severity) -> String {
    format!("alert alert-{severity} alert-dismissible fade show position-fixed")
}

/// Sink for user-visible notifications.
pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNotifier;

impl Notifier for BrowserNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        if let Err(error) = show_notification(message, severity) {
            log::error!("Fail to show notification, severity={severity}, error={error}");
        }
    }
}

/// Where banners are drawn.
pub trait BannerSurface {
    type Banner: 'static;

    /// Adds one banner; `on_close` is wired to its close button.
    fn append(
        &self,
        message: &str,
        severity: Severity,
        on_close: Callback<()>,
    ) -> Result<Self::Banner, DomError>;

    fn remove(&self, banner: Self::Banner);
}

struct Shown<B> {
    banner: Option<B>,
    expiry: Option<ScheduledTask>,
}

/// Shows one banner on `surface`. It is taken down after
/// [`NOTIFICATION_TIMEOUT_MS`] or when closed, whichever comes first.
pub fn present<S, C>(
    surface: &Rc<S>,
    scheduler: &C,
    message: &str,
    severity: Severity,
) -> Result<(), DomError>
where
    S: BannerSurface + 'static,
    C: Scheduler + ?Sized,
{
    let shown = Rc::new(RefCell::new(Shown {
        banner: None,
        expiry: None,
    }));
    // The close button owns the banner state until the banner goes away.
    let on_close = {
        let surface = Rc::clone(surface);
        let shown = Rc::clone(&shown);
        Callback::from(move |()| take_down(&*surface, &shown, false))
    };
    let banner = surface.append(message, severity, on_close)?;
    shown.borrow_mut().banner = Some(banner);

    let expire = {
        let surface = Rc::clone(surface);
        let shown = Rc::downgrade(&shown);
        move || {
            if let Some(shown) = shown.upgrade() {
                take_down(&*surface, &shown, true);
            }
        }
    };
    let expiry = scheduler.schedule(NOTIFICATION_TIMEOUT_MS, Box::new(expire));
    shown.borrow_mut().expiry = Some(expiry);
    Ok(())
}

fn take_down<S: BannerSurface>(surface: &S, shown: &RefCell<Shown<S::Banner>>, expired: bool) {
    let (banner, expiry) = {
        let mut shown = shown.borrow_mut();
        (shown.banner.take(), shown.expiry.take())
    };
    if let Some(expiry) = expiry {
        // A fired timer is left alone; it is running this very call.
        if expired {
            expiry.detach();
        } else {
            expiry.cancel();
        }
    }
    if let Some(banner) = banner {
        surface.remove(banner);
    }
}

/// Banners appended straight to `document.body`; the appended node is the
/// alert itself.
pub struct DomBanners {
    document: Document,
}

pub struct MountedBanner {
    node: Element,
    app: AppHandle<NotificationBanner>,
}

impl DomBanners {
    pub fn new() -> Result<Self, DomError> {
        Ok(DomBanners {
            document: dom::document()?,
        })
    }
}

impl BannerSurface for DomBanners {
    type Banner = MountedBanner;

    fn append(
        &self,
        message: &str,
        severity: Severity,
        on_close: Callback<()>,
    ) -> Result<MountedBanner, DomError> {
        let body = self
            .document
            .body()
            .ok_or_else(|| DomError::MissingElement("body".to_owned()))?;
        let node = self.document.create_element("div")?;
        node.set_class_name(&alert_classes(severity));
        node.set_attribute("style", NOTIFICATION_STYLE)?;
        node.set_attribute("role", "alert")?;
        body.append_child(&node)?;

        let props = Props {
            message: AttrValue::from(message.to_owned()),
            on_close,
        };
        let app = Renderer::<NotificationBanner>::with_root_and_props(node.clone(), props).render();
        Ok(MountedBanner { node, app })
    }

    fn remove(&self, banner: MountedBanner) {
        let MountedBanner { node, app } = banner;
        if node.parent_node().is_some() {
            node.remove();
        }
        // Closing runs inside the banner's own callback, so unmounting waits.
        spawn_local(async move { app.destroy() });
    }
}

/// Appends a dismissible banner to `document.body`. `message` is inserted as
/// markup, so it must not carry untrusted text.
pub fn show_notification(message: &str, severity: Severity) -> Result<(), DomError> {
    present(&Rc::new(DomBanners::new()?), &BrowserScheduler, message, severity)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn severity_parses_case_insensitively() {
        assert_eq!(Severity::from_str("warning").unwrap(), Severity::Warning);
        assert_eq!(Severity::from_str("DANGER").unwrap(), Severity::Danger);
        assert!(Severity::from_str("fatal").is_err());
        assert_eq!(Severity::default(), Severity::Info);
    }

    #[test]
    fn alert_classes_carry_the_severity() {
        assert_eq!(
            alert_classes(Severity::Success),
            "alert alert-success alert-dismissible fade show position-fixed"
        );
    }
}
