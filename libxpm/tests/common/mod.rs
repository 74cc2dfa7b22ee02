#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

pub const SMILEY: &str = "../test_assets/smiley.xpm";
pub const CURSOR_WITH_HOTSPOT: &str = "../test_assets/cursor.xpm";
pub const UNKNOWN_COLOR_NAME: &str = "../test_assets/unknown_name.xpm";
pub const BAD_ROW_WIDTH: &str = "../test_assets/bad_row_width.xpm";

/// Counts the events logged at `WARN`
#[derive(Clone, Default)]
pub struct WarnCounter(Arc<AtomicUsize>);

impl WarnCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}
