use crate::api::handlers::{health, login, register, session, types};
use utoipa::{
    openapi::{Contact, License},
    OpenApi,
};

// `#[utoipa::path]` on each handler binds HTTP method + path; this derive
// collects them into the published document.
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        register::register,
        login::login,
        session::session,
        session::logout
    ),
    components(schemas(
        types::AccountRegister,
        types::RegisterResponse,
        types::AccountLogin,
        types::LoginResponse,
        types::SessionResponse,
        health::Health
    )),
    tags(
        (name = "auth", description = "Registration, login and sessions"),
        (name = "health", description = "Service health")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Use Cargo.toml metadata instead of the derive defaults.
    let mut doc = ApiDoc::openapi();
    doc.info.description = optional_str(env!("CARGO_PKG_DESCRIPTION")).map(str::to_string);
    doc.info.contact = cargo_contact();
    doc.info.license = cargo_license();
    doc
}

fn cargo_contact() -> Option<Contact> {
    // Cargo authors are `;` separated and may include "Name <email>".
    let authors = env!("CARGO_PKG_AUTHORS");
    let primary = authors.split(';').next().map(str::trim)?;
    if primary.is_empty() {
        return None;
    }

    let (name, email) = parse_author(primary);
    if name.is_none() && email.is_none() {
        return None;
    }

    let mut contact = Contact::new();
    contact.name = name.map(str::to_string);
    contact.email = email.map(str::to_string);
    Some(contact)
}

fn cargo_license() -> Option<License> {
    let identifier = optional_str(env!("CARGO_PKG_LICENSE"))?;
    let mut license = License::new(identifier);
    license.identifier = Some(identifier.to_string());
    Some(license)
}

fn optional_str(value: &'static str) -> Option<&'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_author(author: &str) -> (Option<&str>, Option<&str>) {
    if let Some(start) = author.find('<') {
        let name = author[..start].trim();
        let email = author[start + 1..].trim_end_matches('>').trim();
        let name = if name.is_empty() { None } else { Some(name) };
        let email = if email.is_empty() { None } else { Some(email) };
        (name, email)
    } else {
        let name = author.trim();
        (if name.is_empty() { None } else { Some(name) }, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_info_from_cargo() {
        let spec = openapi();
        assert_eq!(spec.info.title, env!("CARGO_PKG_NAME"));
        assert_eq!(spec.info.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(
            spec.info.description.as_deref(),
            Some(env!("CARGO_PKG_DESCRIPTION"))
        );

        let contact = spec.info.contact;
        assert!(contact.is_some());
        if let Some(contact) = contact {
            assert_eq!(contact.name.as_deref(), Some("Team Monujo"));
            assert_eq!(contact.email.as_deref(), Some("team@monujo.dev"));
        }

        let license = spec.info.license;
        assert!(license.is_some());
        if let Some(license) = license {
            assert_eq!(license.name, "BSD-3-Clause");
            assert_eq!(license.identifier.as_deref(), Some("BSD-3-Clause"));
        }
    }

    #[test]
    fn openapi_tags_and_paths() {
        let spec = openapi();
        let tags = spec.tags.clone().unwrap_or_default();
        assert!(tags.iter().any(|tag| tag.name == "auth"));
        assert!(tags.iter().any(|tag| tag.name == "health"));
        assert!(spec.paths.paths.contains_key("/auth/register"));
        assert!(spec.paths.paths.contains_key("/auth/login"));
        assert!(spec.paths.paths.contains_key("/auth/session"));
        assert!(spec.paths.paths.contains_key("/auth/logout"));
        assert!(spec.paths.paths.contains_key("/health"));
    }

    #[test]
    fn parse_author_variants() {
        assert_eq!(
            parse_author("Team Monujo <team@monujo.dev>"),
            (Some("Team Monujo"), Some("team@monujo.dev"))
        );
        assert_eq!(parse_author("Team Monujo"), (Some("Team Monujo"), None));
        assert_eq!(parse_author("<team@monujo.dev>"), (None, Some("team@monujo.dev")));
        assert_eq!(parse_author("   "), (None, None));
    }
}
