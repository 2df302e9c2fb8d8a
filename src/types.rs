use std::fmt;

/// One path-data command: a letter plus its numeric parameters.
///
/// Uppercase commands are absolute, lowercase relative. Parameter
/// count is fixed per command except for the catch-all `R`/`r`.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub cmd: char,
    pub args: Vec<f64>,
}

impl Segment {
    pub fn new(cmd: char, args: Vec<f64>) -> Self {
        Self { cmd, args }
    }

    pub fn is_relative(&self) -> bool {
        self.cmd.is_ascii_lowercase()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cmd)?;
        for (idx, arg) in self.args.iter().enumerate() {
            if idx != 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", fstr(*arg))?;
        }
        Ok(())
    }
}

/// Return a 'minimal' representation of the given number
pub fn fstr(x: f64) -> String {
    // collapse negative zero, which rounding can produce
    if x == 0. {
        return "0".to_string();
    }
    x.to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_fstr() {
        assert_eq!(fstr(1.0), "1");
        assert_eq!(fstr(-2.5), "-2.5");
        assert_eq!(fstr(0.5), "0.5");
        assert_eq!(fstr(0.0), "0");
        assert_eq!(fstr(-0.0), "0");
    }

    #[test]
    fn test_segment_display() {
        let s = Segment::new('M', vec![10., -5.5]);
        assert_eq!(s.to_string(), "M10 -5.5");
        assert_eq!(Segment::new('z', vec![]).to_string(), "z");
    }

    #[test]
    fn test_relative() {
        assert!(Segment::new('l', vec![1., 1.]).is_relative());
        assert!(!Segment::new('L', vec![1., 1.]).is_relative());
    }
}
