//! Client-side domain: resource capabilities, query encoding, validation,
//! call handles, session and view state.

pub mod call;
pub mod query;
pub mod resource;
pub mod session;
pub mod validation;
pub mod view_state;

pub use call::{Call, Subscription};
pub use query::{QueryParams, format_date};
pub use resource::{CrudApi, Resource};
pub use session::{Session, TOKEN_KEY, TokenStore, TokenStoreError};
pub use validation::{DateRange, END_BEFORE_START, check_range};
pub use view_state::ViewState;
