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

//! Native stack headroom for the recursive stages.
//!
//! The parser, the evaluator and the value renderer all recurse on the
//! shape of the script. Each recursion point runs through [`guarded`], which
//! moves onto a fresh heap-allocated segment when the current stack runs
//! low. Script-visible bounds (`max_call_depth`, the parser's nesting limit)
//! stay the only limits a script can hit, whatever thread the host runs on.

/// Remaining stack below which the next recursion switches segments.
const RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Runs `f`, first growing the stack if less than [`RED_ZONE`] is left.
#[inline]
pub fn guarded<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth(n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            guarded(|| depth(n - 1) + 1)
        }
    }

    #[test]
    fn deep_recursion_survives_a_small_thread() {
        let handle = std::thread::Builder::new()
            .stack_size(256 * 1024)
            .spawn(|| depth(100_000))
            .unwrap();
        assert_eq!(handle.join().unwrap(), 100_000);
    }
}
