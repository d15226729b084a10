// ============================================================
// Layer 4 — Domain Loaders
// ============================================================
// Reads domains from plain text files.
//
// Labelled data (training / evaluation) is CSV:
//
//   domain,type
//   nvidia.com,0
//   xj3f9sd.biz,1
//
// The header is optional. When present, the `domain` column and
// the `type` (or `label`) column are located by name; otherwise
// the first two columns are used. Labels are class indices, or
// the words `legit` / `dga`.
//
// Unlabelled data (inference) is one domain per line.
// Blank lines and `#` comments are skipped in both formats.

use std::{fs, path::{Path, PathBuf}};

use crate::data::preprocessor::Preprocessor;
use crate::domain::record::{DomainRecord, DomainType};
use crate::domain::traits::DomainSource;
use crate::error::{DgaError, DgaResult};

/// Loads labelled domains from a CSV file.
pub struct CsvDomainLoader {
    path: PathBuf,
}

impl CsvDomainLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DomainSource for CsvDomainLoader {
    fn load_all(&self) -> DgaResult<Vec<DomainRecord>> {
        let text = fs::read_to_string(&self.path)?;
        let records = parse_labelled(&text)?;
        tracing::info!(
            "Loaded {} labelled domains from '{}'",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}

/// Parse labelled CSV text into records.
pub fn parse_labelled(text: &str) -> DgaResult<Vec<DomainRecord>> {
    let prep = Preprocessor::new();
    let mut records = Vec::new();
    let mut columns: Option<(usize, usize)> = None;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        if prep.is_ignorable(line) {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();

        // The first meaningful line decides the column layout.
        let (domain_col, label_col) = match columns {
            Some(cols) => cols,
            None => {
                if let Some(cols) = header_columns(&fields) {
                    columns = Some(cols);
                    continue;
                }
                columns = Some((0, 1));
                (0, 1)
            }
        };

        let domain = fields
            .get(domain_col)
            .map(|d| prep.clean(d))
            .filter(|d| !d.is_empty())
            .ok_or_else(|| DgaError::parse(line_no, "missing domain column"))?;
        let raw_label = fields
            .get(label_col)
            .ok_or_else(|| DgaError::parse(line_no, "missing label column"))?;
        let label = parse_label(raw_label)
            .ok_or_else(|| DgaError::parse(line_no, format!("invalid label '{raw_label}'")))?;

        records.push(DomainRecord::new(domain, label));
    }

    Ok(records)
}

/// Read an unlabelled domain list, one per line.
pub fn load_domain_list(path: &Path) -> DgaResult<Vec<String>> {
    let text = fs::read_to_string(path)?;
    let prep = Preprocessor::new();
    let domains: Vec<String> = text
        .lines()
        .filter(|l| !prep.is_ignorable(l))
        .map(|l| prep.clean(l))
        .collect();
    tracing::debug!("Read {} domains from '{}'", domains.len(), path.display());
    Ok(domains)
}

fn header_columns(fields: &[&str]) -> Option<(usize, usize)> {
    let lower: Vec<String> = fields.iter().map(|f| f.to_ascii_lowercase()).collect();
    let domain_col = lower.iter().position(|f| f == "domain")?;
    let label_col  = lower.iter().position(|f| f == "type" || f == "label")?;
    Some((domain_col, label_col))
}

fn parse_label(raw: &str) -> Option<usize> {
    if let Ok(n) = raw.parse::<usize>() {
        return Some(n);
    }
    match raw.to_ascii_lowercase().as_str() {
        "legit" | "benign" => Some(DomainType::Legit.index()),
        "dga" => Some(DomainType::Dga.index()),
        _ => None,
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_with_header() {
        let text = "domain,type\nnvidia.com,0\nxj3f9sd.biz,1\n";
        let records = parse_labelled(text).unwrap();
        assert_eq!(records, vec![
            DomainRecord::new("nvidia.com", 0),
            DomainRecord::new("xj3f9sd.biz", 1),
        ]);
    }

    #[test]
    fn test_parse_header_with_reordered_columns() {
        let text = "label,domain\ndga,xj3f9sd.biz\nlegit,nvidia.com\n";
        let records = parse_labelled(text).unwrap();
        assert_eq!(records[0], DomainRecord::new("xj3f9sd.biz", 1));
        assert_eq!(records[1], DomainRecord::new("nvidia.com", 0));
    }

    #[test]
    fn test_parse_without_header_skips_blank_and_comments() {
        let text = "# seed list\nnvidia.com,0\n\n  example.org. ,0\r\n";
        let records = parse_labelled(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].domain, "example.org");
    }

    #[test]
    fn test_invalid_label_reports_line_number() {
        let text = "domain,type\nnvidia.com,0\nxj3f9sd.biz,maybe\n";
        match parse_labelled(text) {
            Err(DgaError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_label_column_is_an_error() {
        assert!(parse_labelled("nvidia.com\n").is_err());
    }

    #[test]
    fn test_csv_loader_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "domain,type").unwrap();
        writeln!(file, "nvidia.com,0").unwrap();
        let records = CsvDomainLoader::new(file.path()).load_all().unwrap();
        assert_eq!(records, vec![DomainRecord::new("nvidia.com", 0)]);
    }

    #[test]
    fn test_domain_list() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "nvidia.com\n\n# skip\nxj3f9sd.biz.").unwrap();
        let domains = load_domain_list(file.path()).unwrap();
        assert_eq!(domains, vec!["nvidia.com", "xj3f9sd.biz"]);
    }
}
