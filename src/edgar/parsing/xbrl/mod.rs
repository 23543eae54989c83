pub mod presentation;

// Re-export the presentation linkbase API
pub use self::presentation::{
    normalize_concept, NodeId, NodeType, PresentationElement, StandardStatement, Target,
    XbrlPresentation,
};
