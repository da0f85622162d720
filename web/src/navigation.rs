use crate::error::describe_js;
use crate::timer::{BrowserScheduler, ScheduledTask, Scheduler};

/// A navigation waiting on its timer. Dropping it cancels the redirect.
pub type ScheduledNavigation = ScheduledTask;

/// Full-page navigation.
pub trait Navigator {
    fn navigate(&self, path: &str);
    fn navigate_after(&self, path: &str, delay_ms: u32) -> ScheduledNavigation;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            log::error!("Navigation failed, path={path}, error=no window");
            return;
        };
        if let Err(error) = window.location().set_href(path) {
            log::error!(
                "Navigation failed, path={path}, error={}",
                describe_js(&error)
            );
        }
    }

    fn navigate_after(&self, path: &str, delay_ms: u32) -> ScheduledNavigation {
        let path = path.to_owned();
        BrowserScheduler.schedule(delay_ms, Box::new(move || BrowserNavigator.navigate(&path)))
    }
}
