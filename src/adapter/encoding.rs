/*
 * Copyright 2019-2020 Wren Powell
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use serde::{Deserialize, Serialize};

use crate::Error;

/// The text encoding of names passed to an adapter.
///
/// Repositories store names in the ISO-8859-1 (Latin-1) repertoire, so names are converted to it
/// before they are submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameEncoding {
    /// Names may contain any character.
    ///
    /// Characters outside of Latin-1 are transliterated. Letters lose their diacritics, ligatures
    /// and typographic punctuation are spelled out in ASCII, and anything else becomes `?`.
    #[default]
    Utf8,

    /// Names only contain characters in the Latin-1 repertoire and are submitted unchanged.
    Latin1,
}

/// The replacement for characters which can't be transliterated.
const UNKNOWN: &str = "?";

/// ASCII spellings of the Latin Extended-A block, starting at U+0100.
const LATIN_EXTENDED_A: [&str; 128] = [
    "A", "a", "A", "a", "A", "a", "C", "c", "C", "c", "C", "c", "C", "c", "D", "d", // U+0100
    "D", "d", "E", "e", "E", "e", "E", "e", "E", "e", "E", "e", "G", "g", "G", "g", // U+0110
    "G", "g", "G", "g", "H", "h", "H", "h", "I", "i", "I", "i", "I", "i", "I", "i", // U+0120
    "I", "i", "IJ", "ij", "J", "j", "K", "k", "k", "L", "l", "L", "l", "L", "l", "L", // U+0130
    "l", "L", "l", "N", "n", "N", "n", "N", "n", "'n", "N", "n", "O", "o", "O", "o", // U+0140
    "O", "o", "OE", "oe", "R", "r", "R", "r", "R", "r", "S", "s", "S", "s", "S", "s", // U+0150
    "S", "s", "T", "t", "T", "t", "T", "t", "U", "u", "U", "u", "U", "u", "U", "u", // U+0160
    "U", "u", "U", "u", "W", "w", "Y", "y", "Y", "Z", "z", "Z", "z", "Z", "z", "s", // U+0170
];

/// Return the Latin-1 spelling of a character outside of the Latin-1 repertoire.
fn transliterate_char(c: char) -> &'static str {
    match c {
        '\u{0100}'..='\u{017F}' => LATIN_EXTENDED_A[c as usize - 0x0100],
        '\u{0218}' => "S",
        '\u{0219}' => "s",
        '\u{021A}' => "T",
        '\u{021B}' => "t",
        '\u{02C6}' => "^",
        '\u{02DC}' => "~",
        '\u{2002}'..='\u{200A}' => " ",
        '\u{2010}'..='\u{2015}' => "-",
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => "'",
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => "\"",
        '\u{2022}' => "o",
        '\u{2026}' => "...",
        '\u{2039}' => "<",
        '\u{203A}' => ">",
        '\u{20AC}' => "EUR",
        '\u{2122}' => "TM",
        _ => UNKNOWN,
    }
}

/// Return whether `c` is in the Latin-1 repertoire.
fn is_latin1(c: char) -> bool {
    (c as u32) <= 0xFF
}

/// Transliterate `name` into the Latin-1 repertoire.
pub fn transliterate(name: &str) -> String {
    let mut output = String::with_capacity(name.len());
    for c in name.chars() {
        if is_latin1(c) {
            output.push(c);
        } else {
            output.push_str(transliterate_char(c));
        }
    }
    output
}

/// Convert `name` into the form which is submitted to the repository.
///
/// # Errors
/// - `Error::InvalidName`: The encoding is `Latin1` and `name` contains a character outside of it.
pub(crate) fn encode_name(name: &str, encoding: NameEncoding) -> crate::Result<String> {
    match encoding {
        NameEncoding::Utf8 => Ok(transliterate(name)),
        NameEncoding::Latin1 => {
            if name.chars().all(is_latin1) {
                Ok(name.to_owned())
            } else {
                Err(Error::InvalidName(name.to_owned()))
            }
        }
    }
}
