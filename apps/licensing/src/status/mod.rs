//! Status snapshot and the projections the licensing UI derives from it.
//!
//! The snapshot is owned by the status-fetch layer; everything here only reads it.

mod information;
mod memo;
pub mod selectors;
mod snapshot;
mod store;


pub use information::{Alert, Icon, InformationDetails, details_for, information_details};
pub use memo::{Memo, MemoizedSelectors};
pub use snapshot::{
    AuthState, ErrorInfo, LicensingInfo, MatlabState, MatlabStatus, ServerStatus, SessionStatus, StatusSnapshot,
    TriggerPosition,
};
pub use store::StatusStore;
