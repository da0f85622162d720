#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use rutas_web::error::DomError;
use rutas_web::config::LOGOUT_LINK_ID;
use rutas_web::navbar::{NavbarHost, LOGOUT_ITEM_MARKUP};
use rutas_web::navigation::{Navigator, ScheduledNavigation};
use rutas_web::notification::{BannerSurface, Notifier, Severity};
use rutas_web::storage::MemoryStorage;
use rutas_web::timer::{ScheduledTask, Scheduler};
use rutas_web::user_session::SessionContext;
use yew::Callback;

#[derive(Default)]
pub struct RecordingNavigator {
    pub visited: RefCell<Vec<String>>,
    pub scheduled: RefCell<Vec<(String, u32)>>,
    pub cancelled: Rc<Cell<usize>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visited.borrow_mut().push(path.to_owned());
    }

    fn navigate_after(&self, path: &str, delay_ms: u32) -> ScheduledNavigation {
        self.scheduled.borrow_mut().push((path.to_owned(), delay_ms));
        let cancelled = self.cancelled.clone();
        ScheduledNavigation::with_cancel(move || cancelled.set(cancelled.get() + 1))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub shown: RefCell<Vec<(String, Severity)>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.shown.borrow_mut().push((message.to_owned(), severity));
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FakeLink {
    pub visible: bool,
    pub markup: String,
}

/// Navbar with the three server-rendered links and a list to append to.
pub struct FakeNavbar {
    pub links: RefCell<HashMap<String, FakeLink>>,
    /// Markup of every appended list item.
    pub items: RefCell<Vec<String>>,
}

impl FakeNavbar {
    pub fn with_links(hrefs: &[&str]) -> Self {
        let links = hrefs
            .iter()
            .map(|href| {
                (
                    (*href).to_owned(),
                    FakeLink {
                        visible: true,
                        markup: String::new(),
                    },
                )
            })
            .collect();
        FakeNavbar {
            links: RefCell::new(links),
            items: RefCell::new(Vec::new()),
        }
    }

    /// Appended items carrying the logout link id.
    pub fn logout_links(&self) -> usize {
        self.items
            .borrow()
            .iter()
            .filter(|item| carries_logout_id(item))
            .count()
    }

    pub fn link(&self, href: &str) -> Option<FakeLink> {
        self.links.borrow().get(href).cloned()
    }
}

impl NavbarHost for FakeNavbar {
    fn set_link_visible(&self, href: &str, visible: bool) -> Result<(), DomError> {
        if let Some(link) = self.links.borrow_mut().get_mut(href) {
            link.visible = visible;
        }
        Ok(())
    }

    fn set_link_markup(&self, href: &str, markup: &str) -> Result<(), DomError> {
        if let Some(link) = self.links.borrow_mut().get_mut(href) {
            markup.clone_into(&mut link.markup);
        }
        Ok(())
    }

    fn has_logout_link(&self) -> bool {
        self.logout_links() > 0
    }

    fn append_logout_link(&self) -> Result<(), DomError> {
        self.items.borrow_mut().push(LOGOUT_ITEM_MARKUP.to_owned());
        Ok(())
    }

    fn remove_logout_link(&self) -> Result<(), DomError> {
        self.items.borrow_mut().retain(|item| !carries_logout_id(item));
        Ok(())
    }
}

fn carries_logout_id(markup: &str) -> bool {
    markup.contains(&format!(r#"id="{LOGOUT_LINK_ID}""#))
}

pub struct Harness {
    pub store: Rc<MemoryStorage>,
    pub navigator: Rc<RecordingNavigator>,
    pub notifier: Rc<RecordingNotifier>,
    pub session: SessionContext,
}

pub fn harness() -> Harness {
    let store = Rc::new(MemoryStorage::new());
    let navigator = Rc::new(RecordingNavigator::default());
    let notifier = Rc::new(RecordingNotifier::default());
    let session = SessionContext::new(store.clone(), navigator.clone(), notifier.clone());
    Harness {
        store,
        navigator,
        notifier,
        session,
    }
}

struct ClockTask {
    due: u64,
    cancelled: Rc<Cell<bool>>,
    run: Option<Box<dyn FnOnce()>>,
}

/// Scheduler whose time only moves through [`ManualClock::advance`].
#[derive(Default)]
pub struct ManualClock {
    now: Cell<u64>,
    tasks: RefCell<Vec<ClockTask>>,
}

impl ManualClock {
    pub fn advance(&self, ms: u32) {
        let now = self.now.get() + u64::from(ms);
        self.now.set(now);
        let due: Vec<Box<dyn FnOnce()>> = self
            .tasks
            .borrow_mut()
            .iter_mut()
            .filter(|task| task.due <= now && !task.cancelled.get())
            .filter_map(|task| task.run.take())
            .collect();
        for task in due {
            task();
        }
    }

    pub fn pending(&self) -> usize {
        self.tasks
            .borrow()
            .iter()
            .filter(|task| task.run.is_some() && !task.cancelled.get())
            .count()
    }
}

impl Scheduler for ManualClock {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ScheduledTask {
        let cancelled = Rc::new(Cell::new(false));
        self.tasks.borrow_mut().push(ClockTask {
            due: self.now.get() + u64::from(delay_ms),
            cancelled: cancelled.clone(),
            run: Some(task),
        });
        ScheduledTask::with_cancel(move || cancelled.set(true))
    }
}

/// Page body that records banners instead of drawing them.
#[derive(Default)]
pub struct FakeBanners {
    pub appended: RefCell<Vec<(String, Severity)>>,
    pub live: RefCell<Vec<usize>>,
    pub removals: Cell<usize>,
    close_buttons: RefCell<Vec<Callback<()>>>,
}

impl FakeBanners {
    pub fn click_close(&self, banner: usize) {
        let close = self.close_buttons.borrow()[banner].clone();
        close.emit(());
    }
}

impl BannerSurface for FakeBanners {
    type Banner = usize;

    fn append(
        &self,
        message: &str,
        severity: Severity,
        on_close: Callback<()>,
    ) -> Result<usize, DomError> {
        let mut appended = self.appended.borrow_mut();
        let banner = appended.len();
        appended.push((message.to_owned(), severity));
        self.live.borrow_mut().push(banner);
        self.close_buttons.borrow_mut().push(on_close);
        Ok(banner)
    }

    fn remove(&self, banner: usize) {
        self.live.borrow_mut().retain(|live| *live != banner);
        self.removals.set(self.removals.get() + 1);
    }
}
