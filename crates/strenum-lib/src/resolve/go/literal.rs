//! Decoding of Go literal tokens.

/// Decode an interpreted string literal, quotes included.
///
/// Go strings hold arbitrary bytes: `\xhh` and octal escapes need not
/// form UTF-8, so the result is a byte string.
pub(crate) fn interpreted_string(text: &str) -> Result<Vec<u8>, String> {
    let inner = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .ok_or_else(|| format!("malformed string literal {text}"))?;
    let mut out = Vec::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0u8; 4];
            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }
        decode_escape(&mut chars, '"', &mut out)?;
    }
    Ok(out)
}

/// Decode a raw string literal, backticks included. Carriage returns are dropped.
pub(crate) fn raw_string(text: &str) -> Result<Vec<u8>, String> {
    let inner = text
        .strip_prefix('`')
        .and_then(|t| t.strip_suffix('`'))
        .ok_or_else(|| format!("malformed raw string literal {text}"))?;
    Ok(inner.bytes().filter(|&b| b != b'\r').collect())
}

/// Decode a rune literal, quotes included, to its code point.
pub(crate) fn rune(text: &str) -> Result<u32, String> {
    let inner = text
        .strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .ok_or_else(|| format!("malformed rune literal {text}"))?;
    let mut chars = inner.chars();
    let value = match chars.next() {
        Some('\\') => {
            let mut out = Vec::new();
            let code = decode_escape(&mut chars, '\'', &mut out)?;
            match code {
                Some(code) => code,
                // Byte escapes denote the byte value itself.
                None => out.first().map(|&b| u32::from(b)).unwrap_or_default(),
            }
        }
        Some(c) => u32::from(c),
        None => return Err("empty rune literal".to_string()),
    };
    if chars.next().is_some() {
        return Err(format!("more than one character in rune literal {text}"));
    }
    Ok(value)
}

/// Parse an integer literal with Go prefixes and `_` separators.
pub(crate) fn int(text: &str) -> Result<i128, String> {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();
    let (digits, radix) = if let Some(rest) = lower.strip_prefix("0x") {
        (rest, 16)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (rest, 8)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (rest, 2)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (&lower[1..], 8)
    } else {
        (lower.as_str(), 10)
    };
    i128::from_str_radix(digits, radix).map_err(|_| format!("invalid integer literal {text}"))
}

/// Parse a decimal floating-point literal. Hex floats are not supported.
pub(crate) fn float(text: &str) -> Result<f64, String> {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    if cleaned.starts_with("0x") || cleaned.starts_with("0X") {
        return Err(format!("hexadecimal float literal {text} is not supported"));
    }
    cleaned
        .parse::<f64>()
        .map_err(|_| format!("invalid float literal {text}"))
}

/// Decode one escape sequence after its backslash.
///
/// Code point escapes are written as UTF-8 and their value returned; byte
/// escapes (`\xhh`, `\ooo`) push the raw byte and return `None`.
fn decode_escape(
    chars: &mut std::str::Chars<'_>,
    quote: char,
    out: &mut Vec<u8>,
) -> Result<Option<u32>, String> {
    let c = chars
        .next()
        .ok_or_else(|| "escape sequence not terminated".to_string())?;
    let code = match c {
        'a' => 0x07,
        'b' => 0x08,
        'f' => 0x0c,
        'n' => u32::from('\n'),
        'r' => u32::from('\r'),
        't' => u32::from('\t'),
        'v' => 0x0b,
        '\\' => u32::from('\\'),
        c if c == quote => u32::from(c),
        'x' => {
            out.push(hex_digits(chars, 2)? as u8);
            return Ok(None);
        }
        'u' => hex_digits(chars, 4)?,
        'U' => hex_digits(chars, 8)?,
        '0'..='7' => {
            let rest = take(chars, 2)?;
            let digits = format!("{c}{rest}");
            let value = u32::from_str_radix(&digits, 8)
                .map_err(|_| format!("invalid octal escape \\{digits}"))?;
            let byte = u8::try_from(value)
                .map_err(|_| format!("octal escape value \\{digits} > 255"))?;
            out.push(byte);
            return Ok(None);
        }
        other => return Err(format!("unknown escape sequence \\{other}")),
    };
    let ch = char::from_u32(code).ok_or_else(|| format!("invalid Unicode code point {code:#x}"))?;
    let mut buf = [0u8; 4];
    out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
    Ok(Some(code))
}

fn hex_digits(chars: &mut std::str::Chars<'_>, n: usize) -> Result<u32, String> {
    let digits = take(chars, n)?;
    u32::from_str_radix(&digits, 16).map_err(|_| format!("invalid hex escape {digits}"))
}

fn take(chars: &mut std::str::Chars<'_>, n: usize) -> Result<String, String> {
    let taken: String = chars.by_ref().take(n).collect();
    if taken.chars().count() != n {
        return Err("escape sequence not terminated".to_string());
    }
    Ok(taken)
}
