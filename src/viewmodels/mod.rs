pub mod quantity_modal;
pub mod code_entry;
pub mod status_banner;
pub mod submission;
pub mod pagination;

pub use quantity_modal::{CloseReason, KeyOutcome, ModalState, QuantityModal};
pub use code_entry::{CodeEntryForm, EntryOutcome, ResolutionSource, VisibleCatalog};
pub use status_banner::{MessageKind, StatusBanner, StatusMessage};
pub use submission::{SubmissionController, SubmissionOutcome};
pub use pagination::{
    classify_link, LinkClick, LinkDecision, PageFragments, PageSurface, PaginationController,
    PostSwapSteps, SwapOutcome,
};
