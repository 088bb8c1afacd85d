use std::fmt;
use std::str::FromStr;

use crate::errors::ScanError;

/// A key into the scanner's text, counted in characters.
///
/// Negative values count from the end of the text. Slices follow the usual
/// `start:stop:step` rules: bounds are clamped, a negative step walks
/// backwards and a zero step is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextIndex {
    At(isize),
    Slice {
        start: Option<isize>,
        stop: Option<isize>,
        step: Option<isize>,
    },
}

impl TextIndex {
    pub fn slice(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> TextIndex {
        TextIndex::Slice { start, stop, step }
    }
}

impl From<isize> for TextIndex {
    fn from(index: isize) -> Self {
        TextIndex::At(index)
    }
}

impl FromStr for TextIndex {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScanError::InvalidIndex(s.to_string());
        let bound = |part: &str| -> Result<Option<isize>, ScanError> {
            let part = part.trim();
            if part.is_empty() {
                Ok(None)
            } else {
                part.parse::<isize>().map(Some).map_err(|_| invalid())
            }
        };

        let parts: Vec<&str> = s.trim().split(':').collect();
        match parts[..] {
            [index] => match bound(index)? {
                Some(index) => Ok(TextIndex::At(index)),
                None => Err(invalid()),
            },
            [start, stop] => Ok(TextIndex::slice(bound(start)?, bound(stop)?, None)),
            [start, stop, step] => Ok(TextIndex::slice(bound(start)?, bound(stop)?, bound(step)?)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for TextIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |bound: &Option<isize>| bound.map(|b| b.to_string()).unwrap_or_default();
        match self {
            TextIndex::At(index) => write!(f, "{}", index),
            TextIndex::Slice {
                start,
                stop,
                step: None,
            } => write!(f, "{}:{}", show(start), show(stop)),
            TextIndex::Slice { start, stop, step } => {
                write!(f, "{}:{}:{}", show(start), show(stop), show(step))
            }
        }
    }
}

pub(crate) fn char_at(text: &str, index: isize) -> Result<char, ScanError> {
    let len = text.chars().count();
    let out_of_range = || ScanError::OutOfRange { index, len };
    let len = isize::try_from(len).map_err(|_| out_of_range())?;

    let resolved = if index < 0 { index + len } else { index };
    if resolved < 0 || resolved >= len {
        return Err(out_of_range());
    }
    text.chars()
        .nth(resolved as usize)
        .ok_or_else(out_of_range)
}

pub(crate) fn slice(
    text: &str,
    start: Option<isize>,
    stop: Option<isize>,
    step: Option<isize>,
) -> Result<String, ScanError> {
    if step == Some(0) {
        let key = TextIndex::slice(start, stop, step);
        return Err(ScanError::InvalidIndex(format!(
            "{}: slice step cannot be zero",
            key
        )));
    }
    let step = step.unwrap_or(1);

    let chars: Vec<char> = text.chars().collect();
    let len = chars.len() as isize;

    // Clamp a bound into range. Walking backwards, -1 stands for "before the
    // first character".
    let clamp = |bound: isize| -> isize {
        if bound < 0 {
            let bound = bound + len;
            if bound < 0 {
                if step < 0 {
                    -1
                } else {
                    0
                }
            } else {
                bound
            }
        } else if bound >= len {
            if step < 0 {
                len - 1
            } else {
                len
            }
        } else {
            bound
        }
    };

    let (start, stop) = if step > 0 {
        (start.map_or(0, clamp), stop.map_or(len, clamp))
    } else {
        (start.map_or(len - 1, clamp), stop.map_or(-1, clamp))
    };

    let mut out = String::new();
    let mut i = start;
    while (step > 0 && i < stop) || (step < 0 && i > stop) {
        out.push(chars[i as usize]);
        // A step past isize::MAX leaves the text anyway.
        match i.checked_add(step) {
            Some(next) => i = next,
            None => break,
        }
    }
    Ok(out)
}

pub(crate) fn get(text: &str, index: TextIndex) -> Result<String, ScanError> {
    match index {
        TextIndex::At(index) => char_at(text, index).map(String::from),
        TextIndex::Slice { start, stop, step } => slice(text, start, stop, step),
    }
}
