use std::fmt;

/// The response kinds this crate knows how to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKind {
    Input,
    Success,
    Redirect,
}

/// Accepted status range for one response kind, and how sub-codes fold.
///
/// Codes in `low..=high` are accepted. Codes up to and including
/// `keep_through` are reported unchanged, everything above folds to
/// `canonical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBand {
    pub low: u8,
    pub high: u8,
    pub keep_through: u8,
    pub canonical: u8,
}

const INPUT_BAND: StatusBand = StatusBand {
    low: 10,
    high: 20,
    keep_through: 11,
    canonical: 10,
};

const SUCCESS_BAND: StatusBand = StatusBand {
    low: 20,
    high: 30,
    keep_through: 20,
    canonical: 20,
};

const REDIRECT_BAND: StatusBand = StatusBand {
    low: 30,
    high: 40,
    keep_through: 31,
    canonical: 30,
};

impl ResponseKind {
    pub fn band(self) -> StatusBand {
        match self {
            ResponseKind::Input => INPUT_BAND,
            ResponseKind::Success => SUCCESS_BAND,
            ResponseKind::Redirect => REDIRECT_BAND,
        }
    }

    /// Picks the kind from the leading status digit, the way servers group
    /// status classes.
    pub fn from_leading_digit(digit: u8) -> Option<Self> {
        match digit {
            b'1' => Some(ResponseKind::Input),
            b'2' => Some(ResponseKind::Success),
            b'3' => Some(ResponseKind::Redirect),
            _ => None,
        }
    }

    /// Checks `code` against this kind's band and folds it.
    ///
    /// Returns `None` when the code is out of band.
    pub fn classify(self, code: u8) -> Option<u8> {
        let band = self.band();
        if code < band.low || code > band.high {
            None
        } else if code > band.keep_through {
            Some(band.canonical)
        } else {
            Some(code)
        }
    }
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResponseKind::Input => "input",
            ResponseKind::Success => "success",
            ResponseKind::Redirect => "redirect",
        };
        f.write_str(name)
    }
}

/// Decodes two ASCII digits into a status code.
pub fn decode_status(bytes: [u8; 2]) -> Option<u8> {
    match bytes {
        [tens @ b'0'..=b'9', ones @ b'0'..=b'9'] => Some((tens - b'0') * 10 + (ones - b'0')),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_rejects_non_digits() {
        assert_eq!(decode_status(*b"42"), Some(42));
        assert_eq!(decode_status(*b"07"), Some(7));
        assert_eq!(decode_status(*b"+1"), None);
        assert_eq!(decode_status(*b"1 "), None);
        assert_eq!(decode_status(*b"a1"), None);
    }

    #[test]
    fn input_boundaries() {
        let kind = ResponseKind::Input;
        assert_eq!(kind.classify(9), None);
        assert_eq!(kind.classify(10), Some(10));
        assert_eq!(kind.classify(11), Some(11));
        assert_eq!(kind.classify(12), Some(10));
        assert_eq!(kind.classify(19), Some(10));
        assert_eq!(kind.classify(20), Some(10));
        assert_eq!(kind.classify(21), None);
    }

    #[test]
    fn success_boundaries() {
        let kind = ResponseKind::Success;
        assert_eq!(kind.classify(19), None);
        assert_eq!(kind.classify(20), Some(20));
        assert_eq!(kind.classify(21), Some(20));
        assert_eq!(kind.classify(30), Some(20));
        assert_eq!(kind.classify(31), None);
    }

    #[test]
    fn redirect_boundaries() {
        let kind = ResponseKind::Redirect;
        assert_eq!(kind.classify(29), None);
        assert_eq!(kind.classify(30), Some(30));
        assert_eq!(kind.classify(31), Some(31));
        assert_eq!(kind.classify(32), Some(30));
        assert_eq!(kind.classify(40), Some(30));
        assert_eq!(kind.classify(41), None);
    }

    #[test]
    fn leading_digit() {
        assert_eq!(ResponseKind::from_leading_digit(b'1'), Some(ResponseKind::Input));
        assert_eq!(ResponseKind::from_leading_digit(b'2'), Some(ResponseKind::Success));
        assert_eq!(ResponseKind::from_leading_digit(b'3'), Some(ResponseKind::Redirect));
        assert_eq!(ResponseKind::from_leading_digit(b'5'), None);
    }
}
