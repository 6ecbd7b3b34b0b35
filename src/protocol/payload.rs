use crate::protocol::error::GatewayError;

/// Literal sent to the power command topic to switch the light off.
pub const POWER_OFF: &str = "OFF";

pub const MAX_BRIGHTNESS: u8 = 100;

/// Command decoded from a message received on one of the incoming topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundCommand {
    Power(bool),
    Brightness(u8),
}

/// Which handler an incoming topic is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Power,
    Brightness,
}

impl InboundCommand {
    pub fn decode(route: Route, payload: &[u8]) -> Result<Self, GatewayError> {
        let text = std::str::from_utf8(payload)
            .map_err(|e| GatewayError::Payload(format!("not valid UTF-8: {e}")))?
            .trim();
        match route {
            Route::Power => decode_power(text).map(InboundCommand::Power),
            Route::Brightness => decode_brightness(text).map(InboundCommand::Brightness),
        }
    }
}

// Accepts true/on/1 and false/off/0 in any case. Anything else is rejected, not read as off.
fn decode_power(text: &str) -> Result<bool, GatewayError> {
    match text.to_lowercase().as_str() {
        "true" | "on" | "1" => Ok(true),
        "false" | "off" | "0" => Ok(false),
        _ => Err(GatewayError::Payload(format!(
            "'{text}' is not a power value"
        ))),
    }
}

fn decode_brightness(text: &str) -> Result<u8, GatewayError> {
    let value = text
        .parse::<u8>()
        .map_err(|e| GatewayError::Payload(format!("'{text}' is not a brightness value: {e}")))?;
    if value > MAX_BRIGHTNESS {
        return Err(GatewayError::Payload(format!(
            "brightness {value} is out of range 0..={MAX_BRIGHTNESS}"
        )));
    }
    Ok(value)
}

pub fn encode_brightness(value: u8) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_power() {
        for on in ["true", "TRUE", " on\n", "1"] {
            assert_eq!(
                InboundCommand::decode(Route::Power, on.as_bytes()).unwrap(),
                InboundCommand::Power(true)
            );
        }
        for off in ["false", "Off", "0"] {
            assert_eq!(
                InboundCommand::decode(Route::Power, off.as_bytes()).unwrap(),
                InboundCommand::Power(false)
            );
        }
        assert!(InboundCommand::decode(Route::Power, b"maybe").is_err());
    }

    #[test]
    fn test_decode_brightness() {
        assert_eq!(
            InboundCommand::decode(Route::Brightness, b"42").unwrap(),
            InboundCommand::Brightness(42)
        );
        assert_eq!(
            InboundCommand::decode(Route::Brightness, b" 100 ").unwrap(),
            InboundCommand::Brightness(100)
        );
        assert!(InboundCommand::decode(Route::Brightness, b"101").is_err());
        assert!(InboundCommand::decode(Route::Brightness, b"-3").is_err());
        assert!(InboundCommand::decode(Route::Brightness, b"half").is_err());
        assert!(InboundCommand::decode(Route::Brightness, &[0xff, 0xfe]).is_err());
    }

    #[test]
    fn test_encode_brightness() {
        assert_eq!(encode_brightness(0), "0");
        assert_eq!(encode_brightness(100), "100");
    }
}
