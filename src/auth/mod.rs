//! Authentication gating: the pre-render [`gate`] and the password [`login`].
//!
//! The two procedures share nothing but the device. The gate must have
//! produced [`AuthOutcome::PermitLogin`] before the submitter runs; that
//! precondition is enforced by whoever renders the form, not here.

pub mod gate;
pub mod login;

pub use self::gate::{AuthOutcome, GateError, evaluate};
pub use self::login::{INVALID_PASSWORD, LOGIN_FAILED, LoginResult, SubmitOutcome, attempt, submit};
