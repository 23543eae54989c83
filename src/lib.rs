pub mod core;
pub mod edgar;

// Re-exports
pub use crate::core::config::EdgarConfig;
pub use edgar::filing::Filing;
pub use edgar::parsing::xbrl::{
    NodeId, NodeType, PresentationElement, StandardStatement, Target, XbrlPresentation,
};
pub use edgar::report::ReportType;
