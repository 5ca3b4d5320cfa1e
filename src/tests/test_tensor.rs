use std::fs;

use approx::assert_abs_diff_eq;

use crate::error::PrepError;
use crate::tensor::{parse_annotations, Annotation, RelationSlice, TensorDataBuilder};

fn topic_builder() -> TensorDataBuilder {
    let mut builder = TensorDataBuilder::new();
    builder.add_annotation("Bike", "n1", RelationSlice::Topic);
    builder.add_annotation("bike", "n2", RelationSlice::Topic);
    builder.add_annotation("Apple", "n2", RelationSlice::Topic);
    builder.add_annotation("apple", "n3", RelationSlice::Topic);
    builder.add_annotation("lonely", "n3", RelationSlice::Topic);
    builder
}

#[test]
fn test_parse_annotation() {
    let a = Annotation::parse(1, "n1\tTopicToken\tBike").unwrap().unwrap();
    assert_eq!(a.need_id, "n1");
    assert_eq!(a.slice, RelationSlice::Topic);
    assert_eq!(a.value, "Bike");

    let a = Annotation::parse(2, "n1\tDescriptionToken\tred bike").unwrap().unwrap();
    assert_eq!(a.slice, RelationSlice::Description);
    assert_eq!(a.value, "red bike");
}

#[test]
fn test_parse_annotation_errors() {
    let err = parse_annotations("n1\tTopicToken\tbike\nn2\tLookup\tx").unwrap_err();
    assert!(matches!(err, PrepError::UnknownAnnotation { line: 2, .. }));

    let err = parse_annotations("n1 TopicToken bike").unwrap_err();
    assert!(matches!(err, PrepError::MalformedRecord { line: 1, .. }));

    assert!(parse_annotations("\n\n").unwrap().is_empty());
}

#[test]
fn test_rare_attributes_dropped() {
    let data = topic_builder().build();

    assert_eq!(data.needs, vec!["n1", "n2", "n3"]);
    let names: Vec<&str> = data.attributes.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["apple", "bike"]);
    assert_eq!(data.n_entities(), 5);
}

#[test]
fn test_header_labels() {
    let data = topic_builder().build();
    assert_eq!(
        data.header_labels(),
        vec!["Need: n1", "Need: n2", "Need: n3", "Attr: apple", "Attr: bike"]
    );
}

#[test]
fn test_topic_slice() {
    let data = topic_builder().build();
    let topic = data.slice(RelationSlice::Topic);

    assert_eq!(topic.shape(), (5, 5));
    assert_eq!(topic.nnz(), 4);
    // apple = column 3, bike = column 4
    assert_abs_diff_eq!(*topic.get(1, 3).unwrap(), 1.0);
    assert_abs_diff_eq!(*topic.get(2, 3).unwrap(), 1.0);
    assert_abs_diff_eq!(*topic.get(0, 4).unwrap(), 1.0);
    assert_abs_diff_eq!(*topic.get(1, 4).unwrap(), 1.0);

    let description = data.slice(RelationSlice::Description);
    assert_eq!(description.shape(), (5, 5));
    assert_eq!(description.nnz(), 0);
}

#[test]
fn test_description_ignored_by_default() {
    let mut builder = TensorDataBuilder::new();
    assert!(!builder.add_annotation("bike", "n9", RelationSlice::Description));
    let data = builder.build();
    assert!(data.needs.is_empty());
    assert_eq!(data.n_entities(), 0);
}

#[test]
fn test_description_counts_towards_frequency() {
    let mut builder = TensorDataBuilder::new().with_description(true);
    builder.add_annotation("bike", "n1", RelationSlice::Topic);
    assert!(builder.add_annotation("bike", "n2", RelationSlice::Description));
    let data = builder.build();

    assert_eq!(data.attributes.len(), 1);
    assert_eq!(data.attributes[0].frequencies, [1, 1]);
    assert_abs_diff_eq!(*data.slice(RelationSlice::Topic).get(0, 2).unwrap(), 1.0);
    assert_abs_diff_eq!(*data.slice(RelationSlice::Description).get(1, 2).unwrap(), 1.0);
}

#[test]
fn test_min_frequency() {
    let data = topic_builder().with_min_frequency(1).build();
    assert_eq!(data.attributes.len(), 3);

    let data = topic_builder().with_min_frequency(3).build();
    assert!(data.attributes.is_empty());
    // needs stay on the axis even without attributes
    assert_eq!(data.n_entities(), 3);
}

#[test]
fn test_frequency_report() {
    let data = topic_builder().build();
    let report = data.frequency_report();
    let expected = format!("{:<30}: 2\n{:<30}: 2\n", "apple", "bike");
    assert_eq!(report, expected);
    assert_eq!(report.lines().next().unwrap().len(), 33);
}

#[test]
fn test_add_annotations_counts_used() {
    let annotations = parse_annotations(
        "n1\tTopicToken\tbike\nn2\tDescriptionToken\tbike\nn2\tTopicToken\tbike\n",
    )
    .unwrap();
    let mut builder = TensorDataBuilder::new();
    assert_eq!(builder.add_annotations(&annotations), 2);
}

#[test]
fn test_write_tensor_data() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("tensor");

    let data = topic_builder().build();
    data.write(&out).unwrap();

    assert_eq!(
        fs::read_to_string(out.join("headers.txt")).unwrap(),
        "Need: n1\nNeed: n2\nNeed: n3\nAttr: apple\nAttr: bike\n"
    );
    assert_eq!(
        fs::read_to_string(out.join("attrFrequency.txt")).unwrap(),
        data.frequency_report()
    );

    let topic = sprs::io::read_matrix_market::<f64, usize, _>(out.join("topic.mtx")).unwrap();
    assert_eq!(topic.shape(), (5, 5));
    assert_eq!(topic.nnz(), 4);
    let description =
        sprs::io::read_matrix_market::<f64, usize, _>(out.join("description.mtx")).unwrap();
    assert_eq!(description.nnz(), 0);
}
