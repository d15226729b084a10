// ============================================================
// Layer 3 — DomainRecord Domain Type
// ============================================================
// A labelled domain name, the unit every other layer works on:
//   - the domain string as it appeared in the source
//   - an integer class index (0 = legitimate, 1 = DGA)
//
// Example:
//   DomainRecord::new("nvidia.com", 0)
//   DomainRecord::new("xj3f9sd.biz", 1)

/// A domain name and its class index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRecord {
    /// The domain name, before truncation
    pub domain: String,

    /// Class index, `0..n_domain_type`
    pub label: usize,
}

impl DomainRecord {
    pub fn new(domain: impl Into<String>, label: usize) -> Self {
        Self { domain: domain.into(), label }
    }

    /// Split a list of records into parallel domain / label vectors,
    /// the shape `DgaDetector::train_model` takes.
    pub fn unzip(records: &[DomainRecord]) -> (Vec<String>, Vec<usize>) {
        records
            .iter()
            .map(|r| (r.domain.clone(), r.label))
            .unzip()
    }
}

/// The two classes of the default binary detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainType {
    Legit = 0,
    Dga = 1,
}

impl DomainType {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Legit),
            1 => Some(Self::Dga),
            _ => None,
        }
    }
}

impl std::fmt::Display for DomainType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Legit => write!(f, "legit"),
            Self::Dga => write!(f, "dga"),
        }
    }
}

/// Output of `predict`: one value per input domain, in input order.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    /// Sigmoid-scaled positive-class (DGA) score per domain, in [0, 1]
    Probabilities(Vec<f32>),

    /// Arg-max class index per domain
    Labels(Vec<usize>),
}

impl Prediction {
    pub fn len(&self) -> usize {
        match self {
            Self::Probabilities(p) => p.len(),
            Self::Labels(l) => l.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the value at `index` for display.
    pub fn format_value(&self, index: usize) -> Option<String> {
        match self {
            Self::Probabilities(p) => p.get(index).map(|v| format!("{v:.4}")),
            Self::Labels(l) => l.get(index).map(|v| v.to_string()),
        }
    }
}
