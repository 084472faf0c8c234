pub mod publisher;
pub mod reconciler;
pub mod report;
pub mod scheduler;

pub use publisher::{Publisher, TelegramPublisher};
pub use reconciler::Reconciler;
pub use report::{Markup, RenderedPage, ReportRenderer};
pub use scheduler::Scheduler;
