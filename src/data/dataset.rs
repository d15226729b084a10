use burn::data::dataset::Dataset;

use crate::data::vectorizer::CharVectorizer;
use crate::domain::record::DomainRecord;

/// One truncated and vectorized domain with its label.
/// `len` is the true sequence length before any padding.
#[derive(Debug, Clone)]
pub struct DgaSample {
    pub domain: String,
    pub codes:  Vec<u32>,
    pub len:    usize,
    pub label:  usize,
}

impl DgaSample {
    pub fn from_record(record: &DomainRecord, truncate: usize, vectorizer: &CharVectorizer) -> Self {
        let domain = vectorizer.truncate(&record.domain, truncate).to_string();
        let codes  = vectorizer.encode(&domain);
        Self { len: codes.len(), domain, codes, label: record.label }
    }
}

pub struct DgaDataset {
    samples: Vec<DgaSample>,
}

impl DgaDataset {
    pub fn new(samples: Vec<DgaSample>) -> Self { Self { samples } }

    pub fn from_records(records: &[DomainRecord], truncate: usize, vectorizer: &CharVectorizer) -> Self {
        let samples = records
            .iter()
            .map(|r| DgaSample::from_record(r, truncate, vectorizer))
            .collect();
        Self { samples }
    }

    pub fn sample_count(&self) -> usize { self.samples.len() }

    pub fn samples(&self) -> &[DgaSample] { &self.samples }

    /// Consecutive batches of at most `batch_size` samples, in dataset order.
    pub fn batches(&self, batch_size: usize) -> std::slice::Chunks<'_, DgaSample> {
        self.samples.chunks(batch_size.max(1))
    }
}

impl Dataset<DgaSample> for DgaDataset {
    fn get(&self, index: usize) -> Option<DgaSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> DgaDataset {
        let records = vec![
            DomainRecord::new("nvidia.com", 0),
            DomainRecord::new("xj3f9sd.biz", 1),
            DomainRecord::new("averyveryverylongdomainname.org", 0),
        ];
        DgaDataset::from_records(&records, 8, &CharVectorizer::default())
    }

    #[test]
    fn test_samples_are_truncated() {
        let ds = dataset();
        let long = ds.get(2).unwrap();
        assert_eq!(long.domain, "averyver");
        assert_eq!(long.len, 8);
        assert_eq!(long.codes.len(), 8);
        assert_eq!(long.label, 0);
    }

    #[test]
    fn test_batches_cover_all_samples_in_order() {
        let ds = dataset();
        let batches: Vec<_> = ds.batches(2).collect();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].len(), 2);
        assert_eq!(batches[1].len(), 1);
        assert_eq!(batches[1][0].domain, "averyver");
    }

    #[test]
    fn test_dataset_trait_len() {
        let ds = dataset();
        assert_eq!(Dataset::len(&ds), 3);
        assert!(ds.get(3).is_none());
    }
}
