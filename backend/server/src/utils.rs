use std::str::FromStr;

use serde::Deserialize;

use crate::{
    color::{ColorError, Rgb, normalize_hex},
    error::AppError::{self, MalformedPayload, MissingField},
};

#[derive(Deserialize, Default)]
pub struct VoteForm {
    pub shade: Option<String>,
    pub vote: Option<String>,
    /// Older clients send `choice` instead of `vote`.
    pub choice: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct BaseColorForm {
    pub base_color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ballot {
    Yes,
    No,
    Skip,
}

impl FromStr for Ballot {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            "skip" => Ok(Self::Skip),
            _ => Err(MalformedPayload),
        }
    }
}

/// The shade and verdict to store, or `None` for a skip.
pub fn get_vote_from_form(form: &VoteForm) -> Result<Option<(Rgb, bool)>, AppError> {
    let ballot: Ballot = form
        .vote
        .as_deref()
        .or(form.choice.as_deref())
        .ok_or(MissingField("vote"))?
        .parse()?;

    if ballot == Ballot::Skip {
        return Ok(None);
    }

    let shade = form
        .shade
        .as_deref()
        .filter(|shade| !shade.trim().is_empty())
        .ok_or(MissingField("shade"))?;

    Ok(Some((Rgb::parse_hex(shade)?, ballot == Ballot::Yes)))
}

/// A submitted base color as a lowercase `#rrggbb` string.
pub fn get_base_color_from_form(form: &BaseColorForm) -> Result<String, AppError> {
    let raw = form.base_color.as_deref().map(str::trim).unwrap_or_default();

    if raw.is_empty() {
        return Err(MissingField("base color"));
    }

    if !raw.starts_with('#') {
        return Err(ColorError::InvalidHex.into());
    }

    Ok(normalize_hex(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote_form(shade: Option<&str>, vote: Option<&str>, choice: Option<&str>) -> VoteForm {
        VoteForm {
            shade: shade.map(str::to_string),
            vote: vote.map(str::to_string),
            choice: choice.map(str::to_string),
        }
    }

    #[test]
    fn test_yes_and_no() {
        assert_eq!(
            get_vote_from_form(&vote_form(Some("#0000FF"), Some("yes"), None)).unwrap(),
            Some((Rgb::new(0, 0, 255), true))
        );
        assert_eq!(
            get_vote_from_form(&vote_form(Some("#0000ff"), Some("no"), None)).unwrap(),
            Some((Rgb::new(0, 0, 255), false))
        );
    }

    #[test]
    fn test_skip_needs_no_shade() {
        assert_eq!(
            get_vote_from_form(&vote_form(None, Some("skip"), None)).unwrap(),
            None
        );
    }

    #[test]
    fn test_legacy_choice_field() {
        assert_eq!(
            get_vote_from_form(&vote_form(Some("#000099"), None, Some("yes"))).unwrap(),
            Some((Rgb::new(0, 0, 0x99), true))
        );
    }

    #[test]
    fn test_rejected_votes() {
        assert!(matches!(
            get_vote_from_form(&vote_form(Some("#0000ff"), None, None)),
            Err(MissingField("vote"))
        ));
        assert!(matches!(
            get_vote_from_form(&vote_form(Some("#0000ff"), Some("maybe"), None)),
            Err(MalformedPayload)
        ));
        assert!(matches!(
            get_vote_from_form(&vote_form(None, Some("yes"), None)),
            Err(MissingField("shade"))
        ));
        assert!(matches!(
            get_vote_from_form(&vote_form(Some("#00zz00"), Some("yes"), None)),
            Err(AppError::InvalidColor(ColorError::InvalidHex))
        ));
    }

    #[test]
    fn test_base_color() {
        let form = |value: &str| BaseColorForm {
            base_color: Some(value.to_string()),
        };

        assert_eq!(get_base_color_from_form(&form(" #ABCDEF ")).unwrap(), "#abcdef");
        assert!(matches!(
            get_base_color_from_form(&BaseColorForm::default()),
            Err(MissingField(_))
        ));
        assert!(matches!(
            get_base_color_from_form(&form("abcdef")),
            Err(AppError::InvalidColor(_))
        ));
        assert!(matches!(
            get_base_color_from_form(&form("#abcdef0")),
            Err(AppError::InvalidColor(ColorError::InvalidLength))
        ));
    }
}
