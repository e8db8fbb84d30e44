use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    pub static ref HEX_COLOR_RE: Regex = Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap();
}

pub fn hex_color(value: &str) -> Result<(), ValidationError> {
    if HEX_COLOR_RE.is_match(value) {
        return Ok(());
    }

    Err(ValidationError::new("hex_color"))
}
