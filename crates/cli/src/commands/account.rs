//! Sign-in commands.
//!
//! # Usage
//!
//! ```bash
//! trails-cart login ana@example.com
//! trails-cart login admin@example.com --admin
//! trails-cart logout
//! ```

use tranquil_trails_core::UserIdentity;

use super::{CliError, Session, Settings};

/// Record a sign-in and switch to the identity's cart.
///
/// If a checkout was interrupted by the sign-in prompt, the page it started
/// from is printed as the next location.
///
/// # Errors
///
/// Returns an error if the identity is blank or storage cannot be written.
#[allow(clippy::print_stdout)]
pub fn login(settings: &Settings, identity: &str, admin: bool) -> Result<(), CliError> {
    let identity = UserIdentity::parse(identity)?;
    let mut session = Session::open(settings)?;
    let state = session.widget.login(&mut session.doc, &identity, admin)?;

    tracing::info!(%identity, %state, key = %session.widget.store().key(), "Signed in");
    println!(
        "Signed in as {identity} ({state}), {} item(s) in cart",
        session.widget.cart().total_quantity()
    );
    session.print_messages();
    Ok(())
}

/// Forget the sign-in.
///
/// # Errors
///
/// Returns an error if storage cannot be written.
pub fn logout(settings: &Settings) -> Result<(), CliError> {
    let mut session = Session::open(settings)?;
    session.widget.logout(&mut session.doc)?;
    session.print_messages();
    Ok(())
}
