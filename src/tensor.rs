//! # RESCAL tensor data from need/attribute annotations
//!
//! The NLP pipeline tags each need document with attribute tokens. This module
//! collects those annotations and writes the input data of the factorization:
//!
//! 1. **Filtering**: attributes annotated on fewer than `min_frequency` needs
//!    (summed over all slices) are dropped
//! 2. **Entity axis**: needs in first-seen order, then the retained attributes
//!    in lexicographic order, written to `headers.txt`
//! 3. **Frequencies**: topic-slice need count per attribute, written to
//!    `attrFrequency.txt`
//! 4. **Slices**: one `N × N` binary matrix per relation with
//!    `(need, attribute) = 1.0`, written as `topic.mtx` and `description.mtx`
//!
//! Description tokens are collected only when enabled with
//! `TensorDataBuilder::with_description`; otherwise they are ignored and the
//! description slice stays empty.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;

use log::{debug, info, trace};
use sprs::CsMat;

use crate::error::{PrepError, Result};
use crate::headers::{attr_label, need_label, HEADERS_FILE};
use crate::matrix_market::write_matrix;
use crate::slice::BinarySlice;

pub const ATTR_FREQUENCY_FILE: &str = "attrFrequency.txt";
pub const TOPIC_ANNOTATION: &str = "TopicToken";
pub const DESCRIPTION_ANNOTATION: &str = "DescriptionToken";

/// Frontal slice of the tensor an annotation contributes to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelationSlice {
    Topic,
    Description,
}

impl RelationSlice {
    pub const ALL: [RelationSlice; 2] = [RelationSlice::Topic, RelationSlice::Description];

    pub fn index(self) -> usize {
        match self {
            RelationSlice::Topic => 0,
            RelationSlice::Description => 1,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            RelationSlice::Topic => "topic.mtx",
            RelationSlice::Description => "description.mtx",
        }
    }

    pub fn from_annotation(kind: &str) -> Option<Self> {
        match kind {
            TOPIC_ANNOTATION => Some(RelationSlice::Topic),
            DESCRIPTION_ANNOTATION => Some(RelationSlice::Description),
            _ => None,
        }
    }
}

impl fmt::Display for RelationSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationSlice::Topic => write!(f, "topic"),
            RelationSlice::Description => write!(f, "description"),
        }
    }
}

/// One line of the annotation file: `<need-id>\t<kind>\t<value>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub line: usize,
    pub need_id: String,
    pub slice: RelationSlice,
    pub value: String,
}

impl Annotation {
    pub fn parse(line: usize, record: &str) -> Result<Option<Self>> {
        if record.trim().is_empty() {
            return Ok(None);
        }
        let mut fields = record.splitn(3, '\t');
        let (need_id, kind, value) = match (fields.next(), fields.next(), fields.next()) {
            (Some(n), Some(k), Some(v)) => (n.trim(), k.trim(), v.trim()),
            _ => {
                return Err(PrepError::MalformedRecord {
                    line,
                    content: record.to_owned(),
                })
            }
        };
        if need_id.is_empty() || value.is_empty() {
            return Err(PrepError::MalformedRecord {
                line,
                content: record.to_owned(),
            });
        }
        let slice = RelationSlice::from_annotation(kind).ok_or_else(|| {
            PrepError::UnknownAnnotation {
                line,
                kind: kind.to_owned(),
            }
        })?;
        Ok(Some(Self {
            line,
            need_id: need_id.to_owned(),
            slice,
            value: value.to_owned(),
        }))
    }
}

pub fn parse_annotations(content: &str) -> Result<Vec<Annotation>> {
    let mut annotations = Vec::new();
    for (i, record) in content.lines().enumerate() {
        if let Some(a) = Annotation::parse(i + 1, record)? {
            annotations.push(a);
        }
    }
    Ok(annotations)
}

pub fn read_annotations(path: &Path) -> Result<Vec<Annotation>> {
    info!("Read annotation input file: {}", path.display());
    let content = fs::read_to_string(path).map_err(|e| PrepError::io(path, e))?;
    let annotations = parse_annotations(&content)?;
    debug!("Parsed {} annotations", annotations.len());
    Ok(annotations)
}

pub struct TensorDataBuilder {
    min_frequency: usize,
    include_description: bool,

    needs: Vec<String>,
    need_positions: HashMap<String, usize>,
    // attribute -> need sets per slice, ordered by attribute name
    attributes: BTreeMap<String, [BTreeSet<String>; 2]>,
}

impl Default for TensorDataBuilder {
    fn default() -> Self {
        Self {
            min_frequency: 2,
            include_description: false,
            needs: Vec::new(),
            need_positions: HashMap::new(),
            attributes: BTreeMap::new(),
        }
    }
}

impl TensorDataBuilder {
    pub fn new() -> Self {
        info!("Initializing new TensorDataBuilder");
        Self::default()
    }

    pub fn with_min_frequency(mut self, min_frequency: usize) -> Self {
        info!("Setting minimum attribute frequency: {}", min_frequency);
        self.min_frequency = min_frequency;
        self
    }

    pub fn with_description(mut self, include: bool) -> Self {
        info!("Setting description slice: {}", include);
        self.include_description = include;
        self
    }

    /// Record that `need` carries `attribute` in `slice`.
    /// Returns false when the annotation is ignored.
    pub fn add_annotation(&mut self, attribute: &str, need: &str, slice: RelationSlice) -> bool {
        if slice == RelationSlice::Description && !self.include_description {
            trace!("Ignoring description token '{}' of need '{}'", attribute, need);
            return false;
        }
        let attribute = attribute.to_lowercase();
        trace!("Need '{}' has {} attribute '{}'", need, slice, attribute);

        self.attributes.entry(attribute).or_default()[slice.index()].insert(need.to_owned());
        if !self.need_positions.contains_key(need) {
            self.need_positions.insert(need.to_owned(), self.needs.len());
            self.needs.push(need.to_owned());
        }
        true
    }

    pub fn add_annotations(&mut self, annotations: &[Annotation]) -> usize {
        annotations
            .iter()
            .filter(|a| self.add_annotation(&a.value, &a.need_id, a.slice))
            .count()
    }

    pub fn build(self) -> TensorData {
        let min_frequency = self.min_frequency;
        let n_before = self.attributes.len();

        let attributes: Vec<AttributeStats> = self
            .attributes
            .into_iter()
            .filter_map(|(name, needs)| {
                let frequencies = [needs[0].len(), needs[1].len()];
                if frequencies.iter().sum::<usize>() < min_frequency {
                    trace!("Dropping rare attribute '{}'", name);
                    None
                } else {
                    Some(AttributeStats {
                        name,
                        frequencies,
                        needs,
                    })
                }
            })
            .collect();
        if attributes.len() < n_before {
            debug!(
                "Removed {} attributes annotated on fewer than {} needs",
                n_before - attributes.len(),
                min_frequency
            );
        }

        let n_needs = self.needs.len();
        let n_entities = n_needs + attributes.len();
        info!("- needs: {}", n_needs);
        info!("- attributes: {}", attributes.len());
        info!("- tensor size: {} x {} x {}", n_entities, n_entities, RelationSlice::ALL.len());

        let slices = RelationSlice::ALL.map(|slice| {
            let mut binary = BinarySlice::new();
            for (a, attr) in attributes.iter().enumerate() {
                for need in &attr.needs[slice.index()] {
                    // every need in an attribute set was registered on insert
                    if let Some(&row) = self.need_positions.get(need) {
                        binary.mark(row, n_needs + a);
                    }
                }
            }
            binary.to_csr(n_entities)
        });

        TensorData {
            needs: self.needs,
            attributes,
            slices,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AttributeStats {
    pub name: String,
    /// Need count per slice, indexed by `RelationSlice::index`
    pub frequencies: [usize; 2],
    needs: [BTreeSet<String>; 2],
}

#[derive(Debug, Clone)]
pub struct TensorData {
    pub needs: Vec<String>,
    pub attributes: Vec<AttributeStats>,
    slices: [CsMat<f64>; 2],
}

impl TensorData {
    pub fn n_entities(&self) -> usize {
        self.needs.len() + self.attributes.len()
    }

    pub fn slice(&self, slice: RelationSlice) -> &CsMat<f64> {
        &self.slices[slice.index()]
    }

    /// Header labels: needs first, then attributes
    pub fn header_labels(&self) -> Vec<String> {
        self.needs
            .iter()
            .map(|n| need_label(n))
            .chain(self.attributes.iter().map(|a| attr_label(&a.name)))
            .collect()
    }

    /// Topic frequency per attribute, attribute padded to 30 characters
    pub fn frequency_report(&self) -> String {
        let mut report = String::new();
        for attr in &self.attributes {
            report.push_str(&format!(
                "{:<30}: {}\n",
                attr.name,
                attr.frequencies[RelationSlice::Topic.index()]
            ));
        }
        report
    }

    /// Write headers, frequencies and every slice into `folder`, creating it if needed
    pub fn write(&self, folder: &Path) -> Result<()> {
        info!("create RESCAL data in folder: {}", folder.display());
        fs::create_dir_all(folder).map_err(|e| PrepError::io(folder, e))?;

        let mut headers = String::new();
        for label in self.header_labels() {
            headers.push_str(&label);
            headers.push('\n');
        }
        let headers_path = folder.join(HEADERS_FILE);
        fs::write(&headers_path, headers).map_err(|e| PrepError::io(&headers_path, e))?;

        let frequency_path = folder.join(ATTR_FREQUENCY_FILE);
        fs::write(&frequency_path, self.frequency_report())
            .map_err(|e| PrepError::io(&frequency_path, e))?;

        for slice in RelationSlice::ALL {
            write_matrix(&folder.join(slice.file_name()), self.slice(slice))?;
        }
        Ok(())
    }
}
