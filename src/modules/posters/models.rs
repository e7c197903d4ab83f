use serde::Deserialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// Primary key of the `posters` table.
pub type PosterId = i64;

/// A row from the `posters` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Poster {
    pub id: PosterId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub year: i32,
    pub vintage: bool,
    pub img_url: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Permitted poster attributes as they arrive in a request body.
///
/// Every field is optional; keys outside this list are ignored and an explicit
/// `null` counts as absent. Values are cast to the column type instead of
/// rejected, see [`cast`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PosterParams {
    #[serde(default, deserialize_with = "cast::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "cast::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "cast::float")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "cast::integer")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "cast::boolean")]
    pub vintage: Option<bool>,
    #[serde(default, deserialize_with = "cast::text")]
    pub img_url: Option<String>,
}

impl PosterParams {
    /// True when no permitted attribute was supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.year.is_none()
            && self.vintage.is_none()
            && self.img_url.is_none()
    }

    /// Overwrite the supplied attributes on `poster`, leaving the rest untouched.
    pub fn apply_to(&self, poster: &mut Poster) {
        if let Some(name) = &self.name {
            poster.name = name.clone();
        }
        if let Some(description) = &self.description {
            poster.description = description.clone();
        }
        if let Some(price) = self.price {
            poster.price = price;
        }
        if let Some(year) = self.year {
            poster.year = year;
        }
        if let Some(vintage) = self.vintage {
            poster.vintage = vintage;
        }
        if let Some(img_url) = &self.img_url {
            poster.img_url = img_url.clone();
        }
    }
}

/// Request body wrapper: `{ "poster": { ... } }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PosterPayload {
    pub poster: Option<PosterParams>,
}

/// Attributes for a poster about to be inserted; omitted params take the
/// column defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewPoster {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub year: i32,
    pub vintage: bool,
    pub img_url: String,
}

impl From<PosterParams> for NewPoster {
    fn from(params: PosterParams) -> Self {
        Self {
            name: params.name.unwrap_or_default(),
            description: params.description.unwrap_or_default(),
            price: params.price.unwrap_or_default(),
            year: params.year.unwrap_or_default(),
            vintage: params.vintage.unwrap_or_default(),
            img_url: params.img_url.unwrap_or_default(),
        }
    }
}

/// Lenient casts from any JSON scalar to a poster column type.
///
/// `null`, arrays and objects are absent, and so are blank strings for the
/// numeric and boolean columns. Text that does not start with a number casts
/// to zero.
pub mod cast {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(text)) => Some(text),
            Some(Value::Number(number)) => Some(number.to_string()),
            Some(Value::Bool(flag)) => Some(if flag { "t" } else { "f" }.to_string()),
            _ => None,
        })
    }

    pub fn float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(number)) => number.as_f64(),
            Some(Value::String(text)) if !text.trim().is_empty() => {
                Some(numeric_prefix(&text).parse().unwrap_or(0.0))
            }
            Some(Value::Bool(flag)) => Some(if flag { 1.0 } else { 0.0 }),
            _ => None,
        };
        Ok(value.map(|price: f64| if price.is_finite() { price } else { 0.0 }))
    }

    pub fn integer<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(number)) => match number.as_i64() {
                Some(whole) => Some(saturate(whole)),
                // `as` truncates toward zero and saturates
                None => number.as_f64().map(|fraction| fraction as i32),
            },
            Some(Value::String(text)) if !text.trim().is_empty() => {
                Some(saturate(integer_prefix(&text).parse().unwrap_or(0)))
            }
            Some(Value::Bool(flag)) => Some(i32::from(flag)),
            _ => None,
        })
    }

    /// `false`, zero, `"0"`, `"f"`, `"false"` and `"off"` are false; any
    /// other non-blank scalar is true.
    pub fn boolean<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Bool(flag)) => Some(flag),
            Some(Value::Number(number)) => Some(number.as_f64() != Some(0.0)),
            Some(Value::String(text)) if !text.is_empty() => Some(!matches!(
                text.as_str(),
                "0" | "f" | "F" | "false" | "FALSE" | "off" | "OFF"
            )),
            _ => None,
        })
    }

    fn saturate(value: i64) -> i32 {
        value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    fn sign_len(text: &str) -> usize {
        usize::from(text.starts_with(['+', '-']))
    }

    fn digits_from(bytes: &[u8], start: usize) -> usize {
        bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count()
    }

    /// Leading `[+-]digits` of `raw`, or `""`.
    fn integer_prefix(raw: &str) -> &str {
        let text = raw.trim_start();
        let sign = sign_len(text);
        match digits_from(text.as_bytes(), sign) {
            0 => "",
            digits => &text[..sign + digits],
        }
    }

    /// Leading decimal number of `raw` with optional fraction and exponent, or `""`.
    fn numeric_prefix(raw: &str) -> &str {
        let text = raw.trim_start();
        let bytes = text.as_bytes();

        let mut end = sign_len(text);
        let whole = digits_from(bytes, end);
        end += whole;

        let mut fraction = 0;
        if bytes.get(end) == Some(&b'.') {
            fraction = digits_from(bytes, end + 1);
            if fraction > 0 {
                end += 1 + fraction;
            }
        }
        if whole == 0 && fraction == 0 {
            return "";
        }

        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let exponent_start = end + 1 + sign_len(&text[end + 1..]);
            let exponent = digits_from(bytes, exponent_start);
            if exponent > 0 {
                end = exponent_start + exponent;
            }
        }
        &text[..end]
    }

}
