//! Session context: selected infirmary and logged-in user name.

use crate::backend::{CookieMirror, SessionStore, UserDirectory};
use crate::domain::session::SessionContext;
use crate::domain::types::InfirmaryName;
use crate::services::{ServiceError, ServiceResult};

const INFIRMARY_COOKIE: &str = "infirmary";

/// `infirmary=<percent-encoded name>; path=/`, spaces encoded as `%20`.
pub fn infirmary_cookie(infirmary: &InfirmaryName) -> ServiceResult<String> {
    let pair = serde_html_form::to_string([(INFIRMARY_COOKIE, infirmary.as_str())])
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    Ok(format!("{}; path=/", pair.replace('+', "%20")))
}

/// Restores the stored context and re-installs its infirmary cookie.
pub fn restore_session<S, C>(store: &S, mirror: &C) -> ServiceResult<SessionContext>
where
    S: SessionStore + ?Sized,
    C: CookieMirror + ?Sized,
{
    let session = store.load_session()?;
    if let Some(infirmary) = &session.infirmary {
        mirror.mirror_cookie(&infirmary_cookie(infirmary)?)?;
    }
    Ok(session)
}

/// Records the infirmary chosen on the dashboard and returns the card label.
pub fn select_infirmary<S, C>(
    store: &S,
    mirror: &C,
    session: &mut SessionContext,
    infirmary: &str,
) -> ServiceResult<String>
where
    S: SessionStore + ?Sized,
    C: CookieMirror + ?Sized,
{
    let infirmary = InfirmaryName::new(infirmary).map_err(ServiceError::from)?;
    mirror.mirror_cookie(&infirmary_cookie(&infirmary)?)?;
    session.set_infirmary(infirmary);
    store.save_session(session)?;
    log::info!("Infirmary saved: {}", session.infirmary_label());
    Ok(session.infirmary_label().to_string())
}

/// Fetches the logged-in user's first name into the session.
///
/// Failures are logged and leave the previously stored name in place.
pub fn load_user<U, S>(directory: &U, store: &S, session: &mut SessionContext) -> Option<String>
where
    U: UserDirectory + ?Sized,
    S: SessionStore + ?Sized,
{
    let user = match directory.current_user() {
        Ok(user) => user,
        Err(err) => {
            log::error!("Failed to fetch the current user: {err}");
            return session.user_first_name.clone();
        }
    };

    match user.first_name {
        Some(first_name) => {
            log::info!("User name: {first_name}");
            session.set_user_first_name(first_name);
            if let Err(err) = store.save_session(session) {
                log::error!("Failed to save the session: {err}");
            }
        }
        None => {
            log::error!(
                "Failed to read the user name: {}",
                user.error.as_deref().unwrap_or("no first_name in response")
            );
        }
    }
    session.user_first_name.clone()
}
