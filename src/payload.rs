//! Analytics payloads.
//!
//! An [`AnalyticsPayload`] is a frozen record of one analytics occurrence:
//! an event, a screen view, a user identification, a user property, or an
//! error. Payloads own all of their data and never borrow store state, so
//! they can be moved into deferred emission tasks freely.
//!
//! # Examples
//!
//! ```
//! use composable_analytics::AnalyticsPayload;
//!
//! let purchase = AnalyticsPayload::event_with("purchase", [("item", "subscription")]);
//! assert_eq!(purchase.kind(), "event");
//! assert_eq!(purchase.name(), Some("purchase"));
//!
//! // A bare string is an event without properties
//! let tap = AnalyticsPayload::from("tap");
//! assert_eq!(tap, AnalyticsPayload::event("tap"));
//! ```

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Event properties, ordered by key.
pub type Properties = BTreeMap<String, String>;

/// One analytics occurrence.
///
/// Equality is structural: two payloads are equal when they are the same
/// variant and all their fields are equal. [`Error`](AnalyticsPayload::Error)
/// payloads compare by their description only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum AnalyticsPayload {
    /// A named event with string properties.
    Event {
        /// Event name.
        name: String,
        /// Event properties (may be empty).
        #[cfg_attr(feature = "serde", serde(default))]
        properties: Properties,
    },
    /// A screen view.
    Screen {
        /// Screen name.
        name: String,
    },
    /// Identifies the current user.
    UserId(String),
    /// Sets a property on the current user.
    UserProperty {
        /// Property name.
        name: String,
        /// Property value.
        value: String,
    },
    /// An error worth reporting.
    Error(ErrorPayload),
}

impl AnalyticsPayload {
    /// An event with no properties.
    pub fn event(name: impl Into<String>) -> Self {
        AnalyticsPayload::Event {
            name: name.into(),
            properties: Properties::new(),
        }
    }

    /// An event with properties.
    ///
    /// ```
    /// use composable_analytics::AnalyticsPayload;
    ///
    /// let changed = AnalyticsPayload::event_with(
    ///     "count_changed",
    ///     [("old_value", "0"), ("new_value", "1")],
    /// );
    /// assert_eq!(changed.to_string(), "event count_changed {new_value=1, old_value=0}");
    /// ```
    pub fn event_with<I, K, V>(name: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        AnalyticsPayload::Event {
            name: name.into(),
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// A screen view.
    pub fn screen(name: impl Into<String>) -> Self {
        AnalyticsPayload::Screen { name: name.into() }
    }

    /// A user identification.
    pub fn user_id(id: impl Into<String>) -> Self {
        AnalyticsPayload::UserId(id.into())
    }

    /// A user property.
    pub fn user_property(name: impl Into<String>, value: impl Into<String>) -> Self {
        AnalyticsPayload::UserProperty {
            name: name.into(),
            value: value.into(),
        }
    }

    /// An error payload wrapping `cause`.
    ///
    /// The description is taken from the error's `Display` output at
    /// construction time.
    pub fn error<E>(cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        AnalyticsPayload::Error(ErrorPayload::new(cause))
    }

    /// An error payload carrying only a description.
    pub fn error_message(description: impl Into<String>) -> Self {
        AnalyticsPayload::Error(ErrorPayload::message(description))
    }

    /// The variant tag as a snake_case string.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalyticsPayload::Event { .. } => "event",
            AnalyticsPayload::Screen { .. } => "screen",
            AnalyticsPayload::UserId(_) => "user_id",
            AnalyticsPayload::UserProperty { .. } => "user_property",
            AnalyticsPayload::Error(_) => "error",
        }
    }

    /// The name carried by events, screens and user properties.
    pub fn name(&self) -> Option<&str> {
        match self {
            AnalyticsPayload::Event { name, .. }
            | AnalyticsPayload::Screen { name }
            | AnalyticsPayload::UserProperty { name, .. } => Some(name.as_str()),
            AnalyticsPayload::UserId(_) | AnalyticsPayload::Error(_) => None,
        }
    }

    /// The properties of an event, `None` for other variants.
    pub fn properties(&self) -> Option<&Properties> {
        match self {
            AnalyticsPayload::Event { properties, .. } => Some(properties),
            _ => None,
        }
    }
}

impl From<&str> for AnalyticsPayload {
    fn from(name: &str) -> Self {
        AnalyticsPayload::event(name)
    }
}

impl From<String> for AnalyticsPayload {
    fn from(name: String) -> Self {
        AnalyticsPayload::event(name)
    }
}

impl From<ErrorPayload> for AnalyticsPayload {
    fn from(error: ErrorPayload) -> Self {
        AnalyticsPayload::Error(error)
    }
}

impl fmt::Display for AnalyticsPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyticsPayload::Event { name, properties } => {
                write!(f, "event {}", name)?;
                if !properties.is_empty() {
                    write!(f, " {{")?;
                    for (i, (key, value)) in properties.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}={}", key, value)?;
                    }
                    write!(f, "}}")?;
                }
                Ok(())
            }
            AnalyticsPayload::Screen { name } => write!(f, "screen {}", name),
            AnalyticsPayload::UserId(id) => write!(f, "user_id {}", id),
            AnalyticsPayload::UserProperty { name, value } => {
                write!(f, "user_property {}={}", name, value)
            }
            AnalyticsPayload::Error(error) => write!(f, "error {}", error),
        }
    }
}

/// The error carried by [`AnalyticsPayload::Error`].
///
/// Holds the description captured at construction and, optionally, the
/// original cause. Two error payloads are equal when their descriptions are
/// equal; the cause instance does not take part in comparison.
#[derive(Clone)]
pub struct ErrorPayload {
    description: String,
    cause: Option<Arc<dyn StdError + Send + Sync>>,
}

impl ErrorPayload {
    /// Capture `cause` and its description.
    pub fn new<E>(cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        ErrorPayload {
            description: cause.to_string(),
            cause: Some(Arc::new(cause)),
        }
    }

    /// A payload with a description and no underlying cause.
    pub fn message(description: impl Into<String>) -> Self {
        ErrorPayload {
            description: description.into(),
            cause: None,
        }
    }

    /// The error description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The original cause, if one was captured.
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

impl PartialEq for ErrorPayload {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description
    }
}

impl Eq for ErrorPayload {}

impl fmt::Debug for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorPayload")
            .field("description", &self.description)
            .field("has_cause", &self.cause.is_some())
            .finish()
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

// The cause is not serializable; it round-trips as its description.
#[cfg(feature = "serde")]
impl serde::Serialize for ErrorPayload {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.description)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ErrorPayload {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(ErrorPayload::message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum TestError {
        TestCase,
        AnotherCase,
    }

    impl fmt::Display for TestError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                TestError::TestCase => write!(f, "Test error case"),
                TestError::AnotherCase => write!(f, "Another test error case"),
            }
        }
    }

    impl StdError for TestError {}

    #[test]
    fn event_equality_covers_name_and_properties() {
        let event1 = AnalyticsPayload::event_with("test", [("key", "value")]);
        let event2 = AnalyticsPayload::event_with("test", [("key", "value")]);
        let event3 = AnalyticsPayload::event_with("different", [("key", "value")]);
        let event4 = AnalyticsPayload::event_with("test", [("different", "value")]);

        assert_eq!(event1, event2);
        assert_ne!(event1, event3);
        assert_ne!(event1, event4);
    }

    #[test]
    fn screen_user_id_and_user_property_equality() {
        assert_eq!(
            AnalyticsPayload::screen("HomeScreen"),
            AnalyticsPayload::screen("HomeScreen")
        );
        assert_ne!(
            AnalyticsPayload::screen("HomeScreen"),
            AnalyticsPayload::screen("SettingsScreen")
        );

        assert_eq!(AnalyticsPayload::user_id("123"), AnalyticsPayload::user_id("123"));
        assert_ne!(AnalyticsPayload::user_id("123"), AnalyticsPayload::user_id("456"));

        let age = AnalyticsPayload::user_property("age", "25");
        assert_eq!(age, AnalyticsPayload::user_property("age", "25"));
        assert_ne!(age, AnalyticsPayload::user_property("age", "30"));
        assert_ne!(age, AnalyticsPayload::user_property("name", "25"));
    }

    #[test]
    fn error_payloads_compare_by_description() {
        let error1 = AnalyticsPayload::error(TestError::TestCase);
        let error2 = AnalyticsPayload::error(TestError::TestCase);
        let error3 = AnalyticsPayload::error(TestError::AnotherCase);

        assert_eq!(error1, error2);
        assert_ne!(error1, error3);
        assert_eq!(error1, AnalyticsPayload::error_message("Test error case"));
    }

    #[test]
    fn different_variants_are_never_equal() {
        let event = AnalyticsPayload::event("x");
        let screen = AnalyticsPayload::screen("x");
        let user_id = AnalyticsPayload::user_id("x");
        let property = AnalyticsPayload::user_property("x", "x");
        let error = AnalyticsPayload::error_message("x");

        assert_ne!(event, screen);
        assert_ne!(screen, user_id);
        assert_ne!(user_id, property);
        assert_ne!(property, error);
    }

    #[test]
    fn string_sugar_is_an_event_without_properties() {
        let analytics: AnalyticsPayload = "button_tapped".into();
        assert_eq!(
            analytics,
            AnalyticsPayload::Event {
                name: "button_tapped".to_string(),
                properties: Properties::new(),
            }
        );
        assert_eq!(AnalyticsPayload::from(String::from("tap")), AnalyticsPayload::event("tap"));
    }

    #[test]
    fn error_payload_keeps_its_cause() {
        let payload = AnalyticsPayload::error(TestError::TestCase);

        match payload {
            AnalyticsPayload::Error(err) => {
                assert_eq!(err.description(), "Test error case");
                let cause = err.cause().expect("cause captured");
                assert_eq!(cause.to_string(), TestError::TestCase.to_string());
            }
            other => panic!("Expected error payload, got {:?}", other),
        }

        let bare = ErrorPayload::message("no cause");
        assert!(bare.cause().is_none());
    }

    #[test]
    fn kind_and_name_accessors() {
        let purchase = AnalyticsPayload::event_with("purchase", [("price", "9.99")]);
        assert_eq!(purchase.kind(), "event");
        assert_eq!(purchase.name(), Some("purchase"));
        assert_eq!(
            purchase
                .properties()
                .and_then(|p| p.get("price"))
                .map(String::as_str),
            Some("9.99")
        );

        assert_eq!(AnalyticsPayload::screen("Profile").name(), Some("Profile"));
        assert_eq!(AnalyticsPayload::user_id("u1").name(), None);
        assert_eq!(AnalyticsPayload::user_property("tier", "pro").kind(), "user_property");
        assert_eq!(AnalyticsPayload::error_message("boom").kind(), "error");
        assert!(AnalyticsPayload::screen("Profile").properties().is_none());
    }

    #[test]
    fn display_describes_each_variant() {
        assert_eq!(AnalyticsPayload::event("tap").to_string(), "event tap");
        assert_eq!(
            AnalyticsPayload::event_with("buy", [("b", "2"), ("a", "1")]).to_string(),
            "event buy {a=1, b=2}"
        );
        assert_eq!(AnalyticsPayload::screen("Home").to_string(), "screen Home");
        assert_eq!(AnalyticsPayload::user_id("42").to_string(), "user_id 42");
        assert_eq!(
            AnalyticsPayload::user_property("tier", "pro").to_string(),
            "user_property tier=pro"
        );
        assert_eq!(
            AnalyticsPayload::error(TestError::AnotherCase).to_string(),
            "error Another test error case"
        );
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn serializes_externally_tagged() {
            let json = serde_json::to_string(&AnalyticsPayload::screen("Home")).unwrap();
            assert_eq!(json, r#"{"screen":{"name":"Home"}}"#);

            let json = serde_json::to_string(&AnalyticsPayload::user_id("42")).unwrap();
            assert_eq!(json, r#"{"user_id":"42"}"#);
        }

        #[test]
        fn error_round_trips_as_description() {
            let payload = AnalyticsPayload::error(TestError::TestCase);
            let json = serde_json::to_string(&payload).unwrap();
            assert_eq!(json, r#"{"error":"Test error case"}"#);

            let back: AnalyticsPayload = serde_json::from_str(&json).unwrap();
            assert_eq!(back, payload);
        }

        #[test]
        fn event_properties_default_to_empty() {
            let back: AnalyticsPayload =
                serde_json::from_str(r#"{"event":{"name":"tap"}}"#).unwrap();
            assert_eq!(back, AnalyticsPayload::from("tap"));
        }
    }
}
