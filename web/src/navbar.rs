use shared::StoredUser;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use crate::config::{DASHBOARD_PATH, LOGIN_PATH, LOGOUT_LINK_ID, REGISTER_PATH};
use crate::dom;
use crate::error::DomError;
use crate::user_session::SessionContext;

const NAVBAR_LIST_SELECTOR: &str = ".navbar-nav";
/// Inner markup of the appended `li.nav-item`. Its link carries
/// [`LOGOUT_LINK_ID`], which is how the link is found again.
pub const LOGOUT_ITEM_MARKUP: &str = r##"<a class="nav-link" href="#" id="logoutBtn"><i class="fas fa-sign-out-alt me-1"></i>Cerrar Sesión</a>"##;

/// Selector of the server-rendered link pointing at `href`.
pub fn link_selector(href: &str) -> String {
    format!(r#"a[href="{href}"]"#)
}

/// What the navigation bar shows for a given session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavbarView {
    pub login_visible: bool,
    pub register_visible: bool,
    /// Markup of the dashboard link; `None` hides the link.
    pub dashboard_label: Option<String>,
    pub logout_link: bool,
}

impl NavbarView {
    pub fn render(logged_in: bool, user: &StoredUser) -> Self {
        if logged_in {
            let name = user.name.as_deref().unwrap_or_default();
            NavbarView {
                login_visible: false,
                register_visible: false,
                dashboard_label: Some(format!(r#"<i class="fas fa-user me-1"></i>{name}"#)),
                logout_link: true,
            }
        } else {
            NavbarView {
                login_visible: true,
                register_visible: true,
                dashboard_label: None,
                logout_link: false,
            }
        }
    }

    /// Brings `host` in line with this view. Safe to call repeatedly: the
    /// logout link is only added when missing.
    pub fn apply<H: NavbarHost>(&self, host: &H) -> Result<(), DomError> {
        host.set_link_visible(LOGIN_PATH, self.login_visible)?;
        host.set_link_visible(REGISTER_PATH, self.register_visible)?;
        match &self.dashboard_label {
            Some(label) => {
                host.set_link_visible(DASHBOARD_PATH, true)?;
                host.set_link_markup(DASHBOARD_PATH, label)?;
            }
            None => host.set_link_visible(DASHBOARD_PATH, false)?,
        }
        if self.logout_link {
            if !host.has_logout_link() {
                host.append_logout_link()?;
            }
        } else {
            host.remove_logout_link()?;
        }
        Ok(())
    }
}

/// The server-rendered navigation bar. Links that are not on the page are
/// skipped silently.
pub trait NavbarHost {
    fn set_link_visible(&self, href: &str, visible: bool) -> Result<(), DomError>;
    fn set_link_markup(&self, href: &str, markup: &str) -> Result<(), DomError>;
    fn has_logout_link(&self) -> bool;
    fn append_logout_link(&self) -> Result<(), DomError>;
    fn remove_logout_link(&self) -> Result<(), DomError>;
}

/// Renders the session state onto `host`.
pub fn update_navbar<H: NavbarHost>(session: &SessionContext, host: &H) -> anyhow::Result<()> {
    let logged_in = session.is_logged_in()?;
    let view = NavbarView::render(logged_in, &session.current_user()?);
    view.apply(host)?;
    log::info!("Navbar updated, logged_in={logged_in}");
    Ok(())
}

pub struct DomNavbar {
    document: Document,
    session: SessionContext,
}

impl DomNavbar {
    pub fn new(document: Document, session: SessionContext) -> Self {
        DomNavbar { document, session }
    }

    fn link(&self, href: &str) -> Result<Option<HtmlElement>, DomError> {
        let link = self.document.query_selector(&link_selector(href))?;
        Ok(link.and_then(|element| element.dyn_into::<HtmlElement>().ok()))
    }
}

impl NavbarHost for DomNavbar {
    fn set_link_visible(&self, href: &str, visible: bool) -> Result<(), DomError> {
        if let Some(link) = self.link(href)? {
            let display = if visible { "block" } else { "none" };
            dom::set_style(&link, "display", display)?;
        }
        Ok(())
    }

    fn set_link_markup(&self, href: &str, markup: &str) -> Result<(), DomError> {
        if let Some(link) = self.link(href)? {
            link.set_inner_html(markup);
        }
        Ok(())
    }

    fn has_logout_link(&self) -> bool {
        self.document.get_element_by_id(LOGOUT_LINK_ID).is_some()
    }

    fn append_logout_link(&self) -> Result<(), DomError> {
        let Some(navbar) = self.document.query_selector(NAVBAR_LIST_SELECTOR)? else {
            return Ok(());
        };
        let item: Element = self.document.create_element("li")?;
        item.set_class_name("nav-item");
        item.set_inner_html(LOGOUT_ITEM_MARKUP);
        navbar.append_child(&item)?;

        let logout_link = dom::element_by_id(&self.document, LOGOUT_LINK_ID)?;
        let session = self.session.clone();
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            event.prevent_default();
            if let Err(error) = session.logout() {
                log::error!("Logout failed, error={error}");
            }
        });
        logout_link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        // Lives as long as the link; the page navigates away on click.
        on_click.forget();
        Ok(())
    }

    fn remove_logout_link(&self) -> Result<(), DomError> {
        if let Some(link) = self.document.get_element_by_id(LOGOUT_LINK_ID) {
            if let Some(item) = link.parent_element() {
                item.remove();
            }
        }
        Ok(())
    }
}
