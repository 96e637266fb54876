//! Frequency Analysis
//!
//! Byte frequency statistics for substitution ciphertext. Every byte value
//! is counted, whitespace and punctuation included.

use transcrack_core::latin1_to_string;

const ENGLISH_FREQ: [f64; 26] = [
    0.082, 0.015, 0.028, 0.043, 0.127, 0.022, 0.020, 0.061, 0.070, 0.002,
    0.008, 0.040, 0.024, 0.067, 0.075, 0.019, 0.001, 0.060, 0.063, 0.091,
    0.028, 0.010, 0.024, 0.002, 0.020, 0.001,
];

#[derive(Debug, Clone)]
pub struct FrequencyAnalysis {
    counts: [usize; 256],
    pub total_chars: usize,
}

impl FrequencyAnalysis {
    pub fn analyze(text: &[u8]) -> Self {
        let mut counts = [0usize; 256];
        for &b in text {
            counts[b as usize] += 1;
        }
        Self {
            counts,
            total_chars: text.len(),
        }
    }

    pub fn count(&self, byte: u8) -> usize {
        self.counts[byte as usize]
    }

    /// Share of `byte` in the text, as a percentage
    pub fn percent(&self, byte: u8) -> f64 {
        if self.total_chars == 0 {
            return 0.0;
        }
        self.count(byte) as f64 / self.total_chars as f64 * 100.0
    }

    /// Bytes that occur, most frequent first (ties by byte value)
    pub fn sorted(&self) -> Vec<(u8, usize)> {
        let mut seen: Vec<(u8, usize)> = (0u8..=255)
            .map(|b| (b, self.counts[b as usize]))
            .filter(|&(_, n)| n > 0)
            .collect();
        seen.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        seen
    }

    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&n| n > 0).count()
    }

    /// English text ≈ 0.067, uniform random letters ≈ 0.038
    pub fn index_of_coincidence(&self) -> f64 {
        if self.total_chars < 2 {
            return 0.0;
        }
        let sum: usize = self.counts.iter().map(|&n| n * n.saturating_sub(1)).sum();
        let n = self.total_chars;
        sum as f64 / (n * (n - 1)) as f64
    }

    /// Chi-squared distance of the letter distribution from English
    pub fn chi_squared_english(&self) -> f64 {
        let letters: Vec<usize> = (0..26u8)
            .map(|i| self.count(b'a' + i) + self.count(b'A' + i))
            .collect();
        let total: usize = letters.iter().sum();
        if total == 0 {
            return 0.0;
        }

        letters
            .iter()
            .zip(ENGLISH_FREQ.iter())
            .map(|(&observed, &expected)| {
                let observed = observed as f64 / total as f64;
                (observed - expected).powi(2) / expected
            })
            .sum()
    }

    /// Plain-text report, one row per occurring byte
    pub fn render_report(&self, name: &str) -> String {
        let mut lines = Vec::new();
        lines.push(format!("Character Frequency Analysis for {}", name));
        lines.push("=".repeat(50));
        lines.push(format!("Total Characters: {}", self.total_chars));
        lines.push(String::new());
        lines.push("Character | Count | Percentage".to_string());
        lines.push("-".repeat(30));

        for (byte, count) in self.sorted() {
            lines.push(format!(
                "  {}  |  {}  |  {:.2}%",
                display_byte(byte),
                count,
                self.percent(byte)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Index of Coincidence: {:.4}", self.index_of_coincidence()));
        lines.push(format!("Chi-squared (English): {:.4}", self.chi_squared_english()));
        lines.push(String::new());
        lines.join("\n")
    }

    /// ASCII bar chart of the `top` most frequent bytes
    pub fn render_ascii(&self, top: usize) -> String {
        let mut lines = Vec::new();
        lines.push("FREQUENCY ANALYSIS".to_string());
        lines.push("═".repeat(40));

        let rows: Vec<(u8, usize)> = self.sorted().into_iter().take(top).collect();
        let max_count = rows.first().map(|&(_, n)| n).unwrap_or(1);
        let scale = 30.0 / max_count as f64;

        for (byte, count) in rows {
            let bar = "█".repeat((count as f64 * scale) as usize);
            lines.push(format!("{:>6}: {:5.2}% |{}", display_byte(byte), self.percent(byte), bar));
        }

        lines.join("\n")
    }
}

/// Quoted, escaped form of a byte for reports: `'a'`, `' '`, `'\n'`, `'\xe9'`
fn display_byte(byte: u8) -> String {
    match byte {
        b'\n' => "'\\n'".to_string(),
        b'\r' => "'\\r'".to_string(),
        b'\t' => "'\\t'".to_string(),
        b'\'' => "\"'\"".to_string(),
        b'\\' => "'\\\\'".to_string(),
        0x20..=0x7e => format!("'{}'", latin1_to_string(&[byte])),
        _ => format!("'\\x{:02x}'", byte),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_analysis() {
        let analysis = FrequencyAnalysis::analyze(b"HELLO WORLD");
        assert_eq!(analysis.total_chars, 11);
        assert_eq!(analysis.count(b'L'), 3);
        assert_eq!(analysis.count(b' '), 1);
        assert_eq!(analysis.distinct(), 8);
    }

    #[test]
    fn test_sorted_order() {
        let analysis = FrequencyAnalysis::analyze(b"AAABBCb");
        let sorted = analysis.sorted();
        assert_eq!(sorted, vec![(b'A', 3), (b'B', 2), (b'C', 1), (b'b', 1)]);
    }

    #[test]
    fn test_percent_and_empty() {
        let analysis = FrequencyAnalysis::analyze(b"aab");
        assert!((analysis.percent(b'a') - 66.666).abs() < 0.01);

        let empty = FrequencyAnalysis::analyze(b"");
        assert_eq!(empty.percent(b'a'), 0.0);
        assert_eq!(empty.index_of_coincidence(), 0.0);
        assert_eq!(empty.chi_squared_english(), 0.0);
        assert!(empty.sorted().is_empty());
    }

    #[test]
    fn test_ioc_english() {
        let english = b"TOBEORNOTTOBETHATISTHEQUESTIONWHETHERTISNOBLER";
        let ioc = FrequencyAnalysis::analyze(english).index_of_coincidence();
        assert!(ioc > 0.05 && ioc < 0.10, "IoC was {}", ioc);
    }

    #[test]
    fn test_report_format() {
        let report = FrequencyAnalysis::analyze(b"aab\n").render_report("sample.txt");
        assert!(report.starts_with("Character Frequency Analysis for sample.txt\n"));
        assert!(report.contains("Total Characters: 4"));
        assert!(report.contains("  'a'  |  2  |  50.00%"));
        assert!(report.contains("  '\\n'  |  1  |  25.00%"));
    }

    #[test]
    fn test_display_byte() {
        assert_eq!(display_byte(b'x'), "'x'");
        assert_eq!(display_byte(b' '), "' '");
        assert_eq!(display_byte(0xe9), "'\\xe9'");
        assert_eq!(display_byte(b'\''), "\"'\"");
    }

    #[test]
    fn test_render_ascii_limits_rows() {
        let chart = FrequencyAnalysis::analyze(b"aaabbc").render_ascii(2);
        assert_eq!(chart.lines().count(), 4);
        assert!(chart.contains("'a'"));
        assert!(!chart.contains("'c'"));
    }
}
