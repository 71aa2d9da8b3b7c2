mod toast;

pub use toast::{MockToastSink, NoOpToastSink, ToastEvent, ToastSink};
