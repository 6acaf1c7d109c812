/*
 * ==========================================================================
 * LANADA - Lua-Flavored Scripting, Straight From Source
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the Lanada scripting language project.
 *
 * Lanada is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

/// Determines whether a given identifier is a **reserved keyword**.
///
/// Used by the lexer to distinguish user-defined identifiers from
/// language-defined keywords. Keywords are emitted as `TokenKind::Keyword`.
///
/// ```text
/// local   -> keyword
/// elseif  -> keyword
/// count   -> identifier
/// ```
pub fn is_keyword(word: &str) -> bool {
    matches!(
        word,
        "local" |
        "function" |
        "return" |
        "if" |
        "then" |
        "else" |
        "elseif" |
        "end" |
        "true" |
        "false" |
        "nil"
    )
}
