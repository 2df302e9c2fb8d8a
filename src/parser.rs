//! Scanner for the SVG 1.1 path-data grammar.
//!
//! Parsing is all-or-nothing: any grammar violation fails the whole
//! parse with the offending character offset, and no partial segment
//! list is ever returned.

use crate::errors::{Error, Result};
use crate::types::Segment;

// Unicode 'special spaces' accepted between tokens, matching browser
// behaviour for path data.
const SPECIAL_SPACES: [char; 17] = [
    '\u{1680}', '\u{180e}', '\u{2000}', '\u{2001}', '\u{2002}', '\u{2003}', '\u{2004}', '\u{2005}',
    '\u{2006}', '\u{2007}', '\u{2008}', '\u{2009}', '\u{200a}', '\u{202f}', '\u{205f}', '\u{3000}',
    '\u{feff}',
];

fn is_space(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r' | '\u{a0}' | '\u{2028}' | '\u{2029}'
    ) || (ch >= '\u{1680}' && SPECIAL_SPACES.contains(&ch))
}

fn is_command(ch: char) -> bool {
    matches!(
        ch.to_ascii_lowercase(),
        'm' | 'z' | 'l' | 'h' | 'v' | 'c' | 's' | 'q' | 't' | 'a' | 'r'
    )
}

fn is_digit_start(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '+' || ch == '-' || ch == '.'
}

fn param_count(cmd_lc: char) -> usize {
    match cmd_lc {
        'a' => 7,
        'c' => 6,
        'h' | 'v' => 1,
        'l' | 'm' | 't' => 2,
        'q' | 's' | 'r' => 4,
        _ => 0, // z
    }
}

struct Scanner {
    data: Vec<char>,
    index: usize,
    param: f64,
    segment_start: usize,
    params: Vec<f64>,
    result: Vec<Segment>,
}

impl Scanner {
    fn new(text: &str) -> Self {
        Self {
            data: text.chars().collect(),
            index: 0,
            param: 0.,
            segment_start: 0,
            params: Vec::new(),
            result: Vec::new(),
        }
    }

    fn at_end(&self) -> bool {
        self.index >= self.data.len()
    }

    fn skip_spaces(&mut self) {
        while !self.at_end() && is_space(self.data[self.index]) {
            self.index += 1;
        }
    }

    /// Arc flags allow only a literal `0` or `1`, with no sign and no
    /// separator needed before the next parameter.
    fn scan_flag(&mut self) -> Result<()> {
        match self.data.get(self.index) {
            Some('0') => self.param = 0.,
            Some('1') => self.param = 1.,
            _ => {
                return Err(Error::grammar(
                    self.index,
                    "arc flag can be `0` or `1` only",
                ))
            }
        }
        self.index += 1;
        Ok(())
    }

    fn scan_param(&mut self) -> Result<()> {
        let start = self.index;
        let max = self.data.len();
        let mut index = start;

        if index >= max {
            return Err(Error::grammar(index, "missed parameter"));
        }
        let mut ch = self.data[index];

        if ch == '+' || ch == '-' {
            index += 1;
            ch = if index < max { self.data[index] } else { '\0' };
        }

        if !ch.is_ascii_digit() && ch != '.' {
            return Err(Error::grammar(
                index,
                "parameter should start with `0..9` or `.`",
            ));
        }

        let mut has_ceiling = false;
        let mut has_decimal = false;
        let mut has_dot = false;

        if ch != '.' {
            let zero_first = ch == '0';
            index += 1;
            ch = if index < max { self.data[index] } else { '\0' };

            // `09` is illegal, `0.9` is fine
            if zero_first && ch.is_ascii_digit() {
                return Err(Error::grammar(
                    index,
                    "numbers started with `0` such as `09` are illegal",
                ));
            }

            while index < max && self.data[index].is_ascii_digit() {
                index += 1;
                has_ceiling = true;
            }
            ch = if index < max { self.data[index] } else { '\0' };
        }

        if ch == '.' {
            has_dot = true;
            index += 1;
            while index < max && self.data[index].is_ascii_digit() {
                index += 1;
                has_decimal = true;
            }
            ch = if index < max { self.data[index] } else { '\0' };
        }

        if ch == 'e' || ch == 'E' {
            if has_dot && !has_ceiling && !has_decimal {
                return Err(Error::grammar(index, "invalid float exponent"));
            }
            index += 1;
            ch = if index < max { self.data[index] } else { '\0' };
            if ch == '+' || ch == '-' {
                index += 1;
            }
            if index < max && self.data[index].is_ascii_digit() {
                while index < max && self.data[index].is_ascii_digit() {
                    index += 1;
                }
            } else {
                return Err(Error::grammar(index, "invalid float exponent"));
            }
        }

        let text: String = self.data[start..index].iter().collect();
        self.param = text
            .parse()
            .map_err(|_| Error::grammar(start, "invalid number"))?;
        self.index = index;
        Ok(())
    }

    /// Emit segments for the command scanned since `segment_start`.
    ///
    /// Extra parameter groups become repeated same-letter segments,
    /// except a leading `M`/`m` pair which continues as `L`/`l`, and
    /// the catch-all `R`/`r` which keeps everything in one segment.
    fn finalize_segment(&mut self) {
        let mut cmd = self.data[self.segment_start];
        let mut cmd_lc = cmd.to_ascii_lowercase();
        let mut params = std::mem::take(&mut self.params);

        if cmd_lc == 'm' && params.len() > 2 {
            let rest = params.split_off(2);
            self.result.push(Segment::new(cmd, params));
            params = rest;
            cmd_lc = 'l';
            cmd = if cmd == 'm' { 'l' } else { 'L' };
        }

        if cmd_lc == 'r' {
            self.result.push(Segment::new(cmd, params));
        } else {
            let count = param_count(cmd_lc);
            while params.len() >= count {
                let rest = params.split_off(count);
                self.result.push(Segment::new(cmd, params));
                params = rest;
                if count == 0 {
                    break;
                }
            }
        }
    }

    fn scan_segment(&mut self) -> Result<()> {
        self.segment_start = self.index;
        let cmd = self.data[self.index];

        if !is_command(cmd) {
            return Err(Error::grammar(
                self.index,
                format!("bad command '{cmd}'"),
            ));
        }
        let is_arc = matches!(cmd, 'a' | 'A');
        let need_params = param_count(cmd.to_ascii_lowercase());

        self.index += 1;
        self.skip_spaces();
        self.params.clear();

        if need_params == 0 {
            // Z
            self.finalize_segment();
            return Ok(());
        }

        let mut comma_found = false;
        loop {
            for i in (1..=need_params).rev() {
                if is_arc && (i == 3 || i == 4) {
                    self.scan_flag()?;
                } else {
                    self.scan_param()?;
                }
                self.params.push(self.param);

                self.skip_spaces();
                comma_found = false;

                if !self.at_end() && self.data[self.index] == ',' {
                    self.index += 1;
                    self.skip_spaces();
                    comma_found = true;
                }
            }

            // after `,` a parameter is mandatory
            if comma_found {
                continue;
            }

            if self.at_end() {
                break;
            }

            // stop on next command letter
            if !is_digit_start(self.data[self.index]) {
                break;
            }
        }

        self.finalize_segment();
        Ok(())
    }
}

/// Parse path data into a segment list.
///
/// The first segment must be a moveto; its command letter is
/// normalized to absolute `M`.
pub fn parse(text: &str) -> Result<Vec<Segment>> {
    let mut scanner = Scanner::new(text);

    scanner.skip_spaces();
    while !scanner.at_end() {
        scanner.scan_segment()?;
    }

    if let Some(first) = scanner.result.first_mut() {
        if !matches!(first.cmd, 'M' | 'm') {
            return Err(Error::Structure(
                "path should start with `M` or `m`".to_string(),
            ));
        }
        first.cmd = 'M';
    }

    Ok(scanner.result)
}
