//! Input validation for channel names, socket ids and event batches.
//!
//! All checks are pure and run before anything is signed or sent.

use crate::error::{PusherError, PusherResult};
use crate::models::event::Event;
use tracing::debug;

/// Maximum length of a channel name accepted by the service.
pub const CHANNEL_NAME_MAX_LENGTH: usize = 164;

/// Maximum number of events in one batch trigger.
pub const MAX_BATCH_SIZE: usize = 10;

/// Punctuation allowed in channel names besides ASCII letters and digits.
pub const CHANNEL_NAME_SYMBOLS: &str = "_=@,.;-";

/// Limits and grammar applied by [`Validator`]. `Default` gives the service's limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRules {
    pub channel_name_max_length: usize,
    pub channel_name_symbols: String,
    pub max_batch_size: usize,
    /// Byte ceiling on each batch event's serialized data; `None` disables the check.
    pub batch_event_data_size_limit: Option<usize>,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            channel_name_max_length: CHANNEL_NAME_MAX_LENGTH,
            channel_name_symbols: CHANNEL_NAME_SYMBOLS.to_string(),
            max_batch_size: MAX_BATCH_SIZE,
            batch_event_data_size_limit: None,
        }
    }
}

/// Validates caller input against a fixed set of [`ValidationRules`].
#[derive(Debug, Clone, Default)]
pub struct Validator {
    rules: ValidationRules,
}

impl Validator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Length is checked first so an over-long name always reports its length.
    pub fn validate_channel_name(&self, name: &str) -> PusherResult<()> {
        let length = name.chars().count();
        if length > self.rules.channel_name_max_length {
            debug!(length, "channel name too long");
            return Err(PusherError::ChannelNameLength {
                length,
                max: self.rules.channel_name_max_length,
            });
        }

        if name.is_empty() || !name.chars().all(|c| self.is_channel_name_char(c)) {
            debug!(channel = %name.escape_debug(), "channel name has invalid characters");
            return Err(PusherError::ChannelNameFormat(name.to_string()));
        }

        Ok(())
    }

    fn is_channel_name_char(&self, c: char) -> bool {
        c.is_ascii_alphanumeric() || self.rules.channel_name_symbols.contains(c)
    }

    /// Stops at the first invalid name, in input order.
    pub fn validate_channel_names<'a, I>(&self, names: I) -> PusherResult<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            self.validate_channel_name(name)?;
        }
        Ok(())
    }

    /// `None` means no socket id was given and passes; `Some("")` does not.
    pub fn validate_socket_id(&self, socket_id: Option<&str>) -> PusherResult<()> {
        match socket_id {
            None => Ok(()),
            Some(id) if is_socket_id(id) => Ok(()),
            Some(id) => {
                debug!(socket_id = %id.escape_debug(), "malformed socket id");
                Err(PusherError::SocketIdFormat(id.to_string()))
            }
        }
    }

    pub fn validate_event_name(&self, name: &str) -> PusherResult<()> {
        if name.is_empty() {
            return Err(PusherError::MissingRequiredField("event name"));
        }
        Ok(())
    }

    /// Size is checked before any event so an oversized batch fails regardless of content.
    pub fn validate_event_batch(&self, events: &[Event]) -> PusherResult<()> {
        if events.len() > self.rules.max_batch_size {
            return Err(PusherError::BatchSizeExceeded {
                size: events.len(),
                max: self.rules.max_batch_size,
            });
        }

        for event in events {
            self.validate_channel_name(&event.channel)?;
            self.validate_event_name(&event.name)?;
            self.validate_socket_id(event.socket_id.as_deref())?;
        }
        Ok(())
    }

    /// Only active when a size limit is configured.
    pub fn validate_batch_event_data(&self, data: Option<&str>) -> PusherResult<()> {
        if let (Some(limit), Some(data)) = (self.rules.batch_event_data_size_limit, data) {
            if data.len() > limit {
                return Err(PusherError::EventDataSizeExceeded {
                    limit,
                    actual: data.len(),
                });
            }
        }
        Ok(())
    }
}

/// `<digits>.<digits>`, nothing before or after.
fn is_socket_id(id: &str) -> bool {
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match id.split_once('.') {
        Some((left, right)) => is_digits(left) && is_digits(right),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v() -> Validator {
        Validator::default()
    }

    #[test]
    fn accepts_every_allowed_character() {
        let all = "abcxyzABCXYZ0189_=@,.;-";
        assert!(v().validate_channel_name(all).is_ok());
        assert!(v().validate_channel_name("a").is_ok());
        assert!(v().validate_channel_name("private-my.channel;1").is_ok());
    }

    #[test]
    fn accepts_max_length() {
        let name = "a".repeat(CHANNEL_NAME_MAX_LENGTH);
        assert!(v().validate_channel_name(&name).is_ok());
    }

    #[test]
    fn rejects_over_max_length_regardless_of_content() {
        let name = "a".repeat(CHANNEL_NAME_MAX_LENGTH + 1);
        assert!(matches!(
            v().validate_channel_name(&name),
            Err(PusherError::ChannelNameLength { length: 165, max: 164 })
        ));

        let name = ":".repeat(CHANNEL_NAME_MAX_LENGTH + 1);
        assert!(matches!(
            v().validate_channel_name(&name),
            Err(PusherError::ChannelNameLength { .. })
        ));
    }

    #[test]
    fn rejects_colons_newlines_and_whitespace() {
        for name in [
            "a:b",
            "a\nb",
            "private-channel:",
            ":private-channel",
            ":\nprivate-channel",
            "private-channel\n:",
            "test_channel\n",
            "my channel",
            "",
        ] {
            assert!(
                matches!(
                    v().validate_channel_name(name),
                    Err(PusherError::ChannelNameFormat(_))
                ),
                "{:?} should be rejected",
                name
            );
        }
    }

    #[test]
    fn channel_names_fail_on_first_invalid() {
        let err = v()
            .validate_channel_names(["this_one_is_okay", "bad:one", "also:bad"])
            .unwrap_err();
        match err {
            PusherError::ChannelNameFormat(name) => assert_eq!(name, "bad:one"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn socket_id_accepts_digits_dot_digits() {
        for id in ["123.456", "1.2", "0.0", "98765432101234.5"] {
            assert!(v().validate_socket_id(Some(id)).is_ok(), "{}", id);
        }
        assert!(v().validate_socket_id(None).is_ok());
    }

    #[test]
    fn socket_id_rejects_malformed() {
        for id in [
            "",
            ":444.444",
            "444.444:",
            "444",
            "444.444a",
            "\n444.444",
            "444.444\n",
            "444.\n444",
            "444..444",
            "444.444.444",
            ".444",
            "444.",
            " 444.444",
            "some_socket_id",
        ] {
            assert!(
                matches!(
                    v().validate_socket_id(Some(id)),
                    Err(PusherError::SocketIdFormat(_))
                ),
                "{:?} should be rejected",
                id
            );
        }
    }

    #[test]
    fn revalidation_is_a_noop() {
        let validator = v();
        for _ in 0..2 {
            assert!(validator.validate_channel_name("my-channel").is_ok());
            assert!(validator.validate_socket_id(Some("123.456")).is_ok());
        }
    }

    fn events(n: usize) -> Vec<Event> {
        (0..n)
            .map(|i| Event::new(format!("channel-{}", i), "my_event", json!({ "i": i })))
            .collect()
    }

    #[test]
    fn batch_of_ten_passes() {
        assert!(v().validate_event_batch(&events(10)).is_ok());
        assert!(v().validate_event_batch(&events(1)).is_ok());
    }

    #[test]
    fn batch_of_eleven_fails_before_per_event_checks() {
        let mut batch = events(11);
        batch[0].channel = "bad:channel".to_string();
        assert!(matches!(
            v().validate_event_batch(&batch),
            Err(PusherError::BatchSizeExceeded { size: 11, max: 10 })
        ));
    }

    #[test]
    fn batch_checks_each_event() {
        let mut batch = events(3);
        batch[2].socket_id = Some("444.444:".to_string());
        assert!(matches!(
            v().validate_event_batch(&batch),
            Err(PusherError::SocketIdFormat(_))
        ));

        let mut batch = events(3);
        batch[1].channel = "x\n".to_string();
        assert!(matches!(
            v().validate_event_batch(&batch),
            Err(PusherError::ChannelNameFormat(_))
        ));
    }

    #[test]
    fn batch_size_cap_is_configurable() {
        let validator = Validator::new(ValidationRules {
            max_batch_size: 2,
            ..ValidationRules::default()
        });
        assert!(validator.validate_event_batch(&events(2)).is_ok());
        assert!(validator.validate_event_batch(&events(3)).is_err());
    }

    #[test]
    fn channel_grammar_is_configurable() {
        let validator = Validator::new(ValidationRules {
            channel_name_symbols: "-".to_string(),
            ..ValidationRules::default()
        });
        assert!(validator.validate_channel_name("a-b").is_ok());
        assert!(validator.validate_channel_name("a@b").is_err());
    }

    #[test]
    fn batch_data_size_only_checked_with_limit() {
        let big = "x".repeat(1000);
        assert!(v().validate_batch_event_data(Some(&big)).is_ok());

        let limited = Validator::new(ValidationRules {
            batch_event_data_size_limit: Some(10),
            ..ValidationRules::default()
        });
        assert!(limited.validate_batch_event_data(None).is_ok());
        assert!(limited.validate_batch_event_data(Some("0123456789")).is_ok());
        assert!(matches!(
            limited.validate_batch_event_data(Some("0123456789A")),
            Err(PusherError::EventDataSizeExceeded {
                limit: 10,
                actual: 11
            })
        ));
        // multi-byte characters count by byte
        assert!(limited.validate_batch_event_data(Some("ééééé_")).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn any_allowed_channel_name_passes(name in "[A-Za-z0-9_=@,.;-]{1,164}") {
            prop_assert!(Validator::default().validate_channel_name(&name).is_ok());
        }

        #[test]
        fn any_overlong_channel_name_fails(name in "[A-Za-z0-9_=@,.;-]{165,300}") {
            let is_length_error = matches!(
                Validator::default().validate_channel_name(&name),
                Err(PusherError::ChannelNameLength { .. })
            );
            prop_assert!(is_length_error);
        }

        #[test]
        fn channel_name_with_colon_fails(
            head in "[A-Za-z0-9_-]{0,80}",
            tail in "[A-Za-z0-9_-]{0,80}"
        ) {
            let name = format!("{}:{}", head, tail);
            let is_format_error = matches!(
                Validator::default().validate_channel_name(&name),
                Err(PusherError::ChannelNameFormat(_))
            );
            prop_assert!(is_format_error);
        }

        #[test]
        fn any_digit_pair_socket_id_passes(a in "[0-9]{1,12}", b in "[0-9]{1,12}") {
            let socket_id = format!("{}.{}", a, b);
            prop_assert!(Validator::default().validate_socket_id(Some(&socket_id)).is_ok());
        }

        #[test]
        fn socket_id_with_trailing_text_fails(
            a in "[0-9]{1,12}",
            b in "[0-9]{1,12}",
            suffix in "[a-z:\n ]{1,8}"
        ) {
            let socket_id = format!("{}.{}{}", a, b, suffix);
            prop_assert!(Validator::default().validate_socket_id(Some(&socket_id)).is_err());
        }
    }
}
