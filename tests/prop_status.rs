//! Status code folding across the whole two-digit space.

use gemini_response::{
    InputResponse, RedirectResponse, ResponseError, ResponseKind, SuccessResponse,
};
use proptest::prelude::*;

/// Expected folded status, or `None` when out of band.
fn expected_fold(kind: ResponseKind, code: u8) -> Option<u8> {
    match kind {
        ResponseKind::Input => match code {
            10 | 11 => Some(code),
            12..=20 => Some(10),
            _ => None,
        },
        ResponseKind::Success => match code {
            20..=30 => Some(20),
            _ => None,
        },
        ResponseKind::Redirect => match code {
            30 | 31 => Some(code),
            32..=40 => Some(30),
            _ => None,
        },
    }
}

fn parse_status(kind: ResponseKind, code: u8) -> Result<u8, ResponseError> {
    match kind {
        ResponseKind::Input => {
            InputResponse::from_raw(format!("{code:02} prompt\r\n").as_bytes()).map(|r| r.status)
        }
        ResponseKind::Success => {
            SuccessResponse::from_raw(format!("{code:02} text/gemini\r\nbody").as_bytes())
                .map(|r| r.status)
        }
        ResponseKind::Redirect => {
            RedirectResponse::from_raw(format!("{code:02} gemini://example.net/\r\n").as_bytes())
                .map(|r| r.status)
        }
    }
}

#[test]
fn every_code_folds_as_documented() {
    for kind in [
        ResponseKind::Input,
        ResponseKind::Success,
        ResponseKind::Redirect,
    ] {
        for code in 0..=99u8 {
            match (expected_fold(kind, code), parse_status(kind, code)) {
                (Some(want), Ok(got)) => assert_eq!(got, want, "{kind} {code:02}"),
                (None, Err(ResponseError::StatusCodeOutOfBand { kind: k, code: c })) => {
                    assert_eq!(k, kind);
                    assert_eq!(c, code);
                }
                (want, got) => panic!("{kind} {code:02}: expected {want:?}, got {got:?}"),
            }
        }
    }
}

fn any_kind() -> impl Strategy<Value = ResponseKind> {
    prop_oneof![
        Just(ResponseKind::Input),
        Just(ResponseKind::Success),
        Just(ResponseKind::Redirect),
    ]
}

fn parse_raw(kind: ResponseKind, raw: &[u8]) -> Result<(), ResponseError> {
    match kind {
        ResponseKind::Input => InputResponse::from_raw(raw).map(drop),
        ResponseKind::Success => SuccessResponse::from_raw(raw).map(drop),
        ResponseKind::Redirect => RedirectResponse::from_raw(raw).map(drop),
    }
}

fn in_band_code(kind: ResponseKind) -> &'static str {
    match kind {
        ResponseKind::Input => "10",
        ResponseKind::Success => "20",
        ResponseKind::Redirect => "30",
    }
}

proptest! {
    #[test]
    fn prop_non_space_separator_fails(
        kind in any_kind(),
        sep in any::<u8>().prop_filter("not a space", |b| *b != b' '),
    ) {
        let mut raw = in_band_code(kind).as_bytes().to_vec();
        raw.push(sep);
        raw.extend_from_slice(b"payload\r\n");

        let result = parse_raw(kind, &raw);
        prop_assert!(
            matches!(result, Err(ResponseError::SeparatorInvalid { .. })),
            "got {:?}",
            result
        );
    }

    #[test]
    fn prop_missing_crlf_fails(
        kind in any_kind(),
        ending in prop_oneof![Just("\n"), Just("\r"), Just(" \n"), Just("\n\r")],
    ) {
        let payload = match kind {
            ResponseKind::Input => "prompt",
            ResponseKind::Success => "text/plain",
            ResponseKind::Redirect => "gemini://example.net/",
        };
        let raw = format!("{} {}{}", in_band_code(kind), payload, ending);
        let result = parse_raw(kind, raw.as_bytes());

        // a lone "\r" never reaches a newline, so the stream runs dry first
        if ending == "\r" {
            prop_assert!(
                matches!(result, Err(ResponseError::UnderlyingStreamFailed(_))),
                "got {:?}",
                result
            );
        } else {
            prop_assert!(
                matches!(result, Err(ResponseError::TerminatorInvalid { .. })),
                "got {:?}",
                result
            );
        }
    }

    #[test]
    fn prop_short_header_fails(kind in any_kind()) {
        let result = parse_raw(kind, b"\n");
        prop_assert!(
            matches!(result, Err(ResponseError::HeaderTooShort { .. })),
            "got {:?}",
            result
        );
    }
}
