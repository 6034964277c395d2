// WHY: standalone normalization so every pattern test sees one canonical form of a line
// The raw text is never modified here; callers keep it for emission

/// Normalize a single screenplay line for pattern testing
/// Digits become ASCII, diacritics and tatweel are dropped, dash and comma variants are
/// unified, whitespace runs collapse to one space, invisible controls are removed, ends trimmed
pub fn normalize_line(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    normalize_line_into(text, &mut result);
    result
}

/// Normalize a line into a supplied buffer to avoid allocation in batch passes
pub fn normalize_line_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    // Leading whitespace is dropped by starting in the "after space" state
    let mut prev_was_space = true;

    for ch in text.chars() {
        if is_stripped(ch) {
            // Removed characters do not break a whitespace run
            continue;
        }

        if ch.is_whitespace() {
            if !prev_was_space {
                buffer.push(' ');
                prev_was_space = true;
            }
            continue;
        }

        buffer.push(canonical_char(ch));
        prev_was_space = false;
    }

    if buffer.ends_with(' ') {
        buffer.pop();
    }
}

/// Map a kept character onto its canonical form
fn canonical_char(ch: char) -> char {
    match ch {
        // Arabic-Indic and extended (Persian) digits
        '\u{0660}'..='\u{0669}' => digit_from_offset(ch as u32 - 0x0660),
        '\u{06F0}'..='\u{06F9}' => digit_from_offset(ch as u32 - 0x06F0),
        // Hyphen, non-breaking hyphen, figure dash, en dash, em dash, horizontal bar, minus
        '\u{2010}'..='\u{2015}' | '\u{2212}' => '-',
        '\u{060C}' => ',',
        _ => ch,
    }
}

fn digit_from_offset(offset: u32) -> char {
    char::from_digit(offset, 10).unwrap_or('0')
}

/// Characters removed outright: combining marks, tatweel, zero-width and bidi controls,
/// and any other control character that is not whitespace
fn is_stripped(ch: char) -> bool {
    matches!(
        ch,
        '\u{064B}'..='\u{065F}'
            | '\u{0670}'
            | '\u{0640}'
            | '\u{061C}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2066}'..='\u{2069}'
            | '\u{FEFF}'
    ) || (ch.is_control() && !ch.is_whitespace())
}

/// Count whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// True for characters that end a sentence in Arabic or Latin punctuation
pub fn is_sentence_punctuation(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | '\u{061F}' | '\u{06D4}' | '\u{2026}')
}

/// True when any sentence punctuation appears in the text
pub fn has_sentence_punctuation(text: &str) -> bool {
    text.chars().any(is_sentence_punctuation)
}

/// True for Arabic-script letters; Arabic punctuation and digits are excluded
pub fn is_arabic_letter(ch: char) -> bool {
    let in_script = matches!(
        ch,
        '\u{0600}'..='\u{06FF}'
            | '\u{0750}'..='\u{077F}'
            | '\u{08A0}'..='\u{08FF}'
            | '\u{FB50}'..='\u{FDFF}'
            | '\u{FE70}'..='\u{FEFF}'
    );
    let is_punct_or_digit = matches!(
        ch,
        '\u{0600}'..='\u{060F}'
            | '\u{061B}'..='\u{061F}'
            | '\u{0660}'..='\u{066D}'
            | '\u{06D4}'
            | '\u{06DD}'..='\u{06DE}'
            | '\u{06E9}'
            | '\u{06F0}'..='\u{06F9}'
            | '\u{FD3E}'..='\u{FD3F}'
            | '\u{FEFF}'
    );
    in_script && !is_punct_or_digit
}

/// True when the text has at least one Arabic letter and nothing but Arabic letters and spaces
pub fn is_arabic_only(text: &str) -> bool {
    let mut saw_letter = false;
    for ch in text.chars() {
        if is_arabic_letter(ch) {
            saw_letter = true;
        } else if !ch.is_whitespace() {
            return false;
        }
    }
    saw_letter
}

/// Dash characters accepted before a raw line, before normalization has unified them
pub const RAW_DASHES: &[char] = &['-', '\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2015}', '\u{2212}'];

/// Remove one leading dash (any variant) and the whitespace around it
pub fn strip_leading_dash(text: &str) -> &str {
    let trimmed = text.trim_start();
    match trimmed.strip_prefix(RAW_DASHES) {
        Some(rest) => rest.trim(),
        None => text.trim(),
    }
}
