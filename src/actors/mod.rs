pub mod widget_controller;

pub use widget_controller::{WidgetArgs, WidgetController, WidgetMessage, WidgetStats};
