use std::collections::HashMap;
use std::net::{IpAddr, Ipv6Addr};

use assert_matches::assert_matches;

use super::*;
use crate::text::TextOptions;
use crate::{containers, Error, ErrorKind, FloatFormat, Length, Traversal};

#[derive(Debug, Default, PartialEq)]
struct Config {
    name: String,
    port: i32,
    tags: Vec<String>,
    limits: HashMap<String, i64>,
    ratio: f32,
    payload: Vec<u8>,
    label: Vec<u8>,
}

impl Inspect for Config {
    fn inspect<T: Traversal>(&mut self, inspector: &mut Inspector<T>) {
        let mut object = inspector.begin_object("config", "service configuration");
        object.string("name", &mut self.name, true, "");
        object.i32("port", &mut self.port, false, "");
        object.field("tags", &mut self.tags, false, "");
        object.field("limits", &mut self.limits, false, "");
        object.f32("ratio", &mut self.ratio, FloatFormat::Shortest, false, "");
        object.bytes("payload", &mut self.payload, false, "");
        object.byte_string("label", &mut self.label, false, "");
        object.end();
    }
}

#[derive(Debug, Default, PartialEq)]
struct Inner {
    x: i64,
}

impl Inspect for Inner {
    fn inspect<T: Traversal>(&mut self, inspector: &mut Inspector<T>) {
        let mut object = inspector.begin_object("inner", "");
        object.i64("x", &mut self.x, true, "");
        object.end();
    }
}

fn sample() -> Config {
    Config {
        name: "edge".into(),
        port: 8080,
        tags: vec!["a".into(), "b".into()],
        limits: [("cpu".to_string(), 2)].into_iter().collect(),
        ratio: 0.25,
        payload: vec![0x00, 0xff],
        label: b"ok".to_vec(),
    }
}

#[test]
fn object_layout() {
    let text = to_string(&mut sample()).unwrap();
    assert_eq!(
        text,
        r#"{"name":"edge","port":8080,"tags":["a","b"],"limits":{"cpu":2},"ratio":0.25,"payload":"AP8","label":"ok"}"#
    );
    assert_eq!(from_str::<Config>(&text).unwrap(), sample());
}

#[test]
fn indeterminate_arrays() {
    for (text, expected) in [("[]", vec![]), ("[7]", vec![7]), ("[0,1,2,3,4]", vec![0, 1, 2, 3, 4])] {
        assert_eq!(from_str::<Vec<i64>>(text).unwrap(), expected, "{}", text);
    }
    assert_eq!(from_str::<Vec<i64>>("null").unwrap(), Vec::<i64>::new());
}

#[test]
fn indeterminate_maps() {
    assert!(from_str::<HashMap<String, i32>>("{}").unwrap().is_empty());

    let map = from_str::<HashMap<String, i32>>(r#"{"a":1}"#).unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map["a"], 1);

    let map = from_str::<HashMap<String, i32>>(r#"{"a":1,"b":2,"c":3,"d":4,"e":5}"#).unwrap();
    assert_eq!(map.len(), 5);
    assert_eq!(map["e"], 5);
}

#[test]
fn nested_structures() {
    let items = from_str::<Vec<Inner>>(r#"[{"x":1},{"x":2}]"#).unwrap();
    assert_eq!(items, [Inner { x: 1 }, Inner { x: 2 }]);

    let map = from_str::<HashMap<String, Vec<Inner>>>(r#"{"a":[{"x":1}],"b":[],"c":null}"#).unwrap();
    assert_eq!(map["a"], [Inner { x: 1 }]);
    assert!(map["b"].is_empty());
    assert!(map["c"].is_empty());
}

#[test]
fn optional_fields_keep_prior_values() {
    let mut config = Config {
        ratio: 9.0,
        tags: vec!["kept".into()],
        ..Config::default()
    };
    let mut inspector = reader(r#"{"name":"edge","port":1}"#.as_bytes());
    config.inspect(&mut inspector);

    assert!(inspector.error().is_none());
    assert_eq!(config.name, "edge");
    assert_eq!(config.port, 1);
    assert_eq!(config.ratio, 9.0);
    assert_eq!(config.tags, ["kept"]);
}

#[test]
fn mandatory_field_missing() {
    let err = from_str::<Config>("{}").unwrap_err();
    assert_matches!(&err, Error::NoField(name) if name == "name");
    assert_eq!(err.kind(), ErrorKind::MissingField);
}

#[test]
fn reordered_field_is_rejected() {
    let err = from_str::<Config>(r#"{"name":"x","tags":[]}"#).unwrap_err();
    assert_matches!(
        &err,
        Error::WrongField { expected, found } if expected == "port" && found == "tags"
    );
}

#[test]
fn extra_field_is_rejected() {
    let err = from_str::<Inner>(r#"{"x":1,"y":2}"#).unwrap_err();
    assert_matches!(err, Error::ObjectTooBig);
}

#[test]
fn under_consumed_array() {
    let mut inspector = reader("[1,2]".as_bytes());
    assert_eq!(inspector.read_array(), Length::Indeterminate);
    let mut first = 0;
    inspector.i64(&mut first);
    inspector.end_array();
    assert_eq!(first, 1);
    assert_matches!(inspector.error(), Some(Error::ArrayTooBig));
}

#[test]
fn failed_array_keeps_only_read_elements() {
    let mut values = vec![9i64; 10];
    let mut inspector = reader(r#"[1,2,"x",4]"#.as_bytes());
    values.inspect(&mut inspector);
    assert_matches!(inspector.error(), Some(Error::UnexpectedToken { .. }));
    assert_eq!(values, [1, 2]);
}

#[test]
fn consumed_array_ends_cleanly() {
    let mut inspector = reader("[1,2]".as_bytes());
    assert_eq!(inspector.read_array(), Length::Indeterminate);
    let mut values = [0i64; 2];
    inspector.i64(&mut values[0]);
    assert!(inspector.have_next());
    inspector.i64(&mut values[1]);
    assert!(!inspector.have_next());
    inspector.end_array();
    assert!(inspector.error().is_none());
    assert_eq!(values, [1, 2]);
}

#[test]
fn non_finite_floats_are_rejected() {
    assert_matches!(to_string(&mut f64::NAN), Err(Error::NonFiniteFloat(v)) if v.is_nan());
    assert_matches!(
        to_string(&mut f32::INFINITY),
        Err(Error::NonFiniteFloat(v)) if v == f64::INFINITY
    );
}

#[test]
fn float_hints_shape_output() {
    let mut inspector = writer(Vec::new());
    inspector.f64(&mut 3.14159, FloatFormat::Fixed(2));
    inspector.f64(&mut 1500.0, FloatFormat::Exponent(1));
    inspector.flush();
    let data = inspector.finish().unwrap().into_inner().into_inner().into_inner();
    assert_eq!(data, b"3.14\n1.5e3");

    let mut inspector = reader(&data[..]);
    let mut values = [0.0f64; 2];
    inspector.f64(&mut values[0], FloatFormat::Shortest);
    inspector.f64(&mut values[1], FloatFormat::Shortest);
    assert!(inspector.error().is_none());
    assert_eq!(values, [3.14, 1500.0]);
}

#[test]
fn shortest_floats_round_trip() {
    for value in [0.1f64, 1e300, f64::MIN_POSITIVE, f64::MAX, 2.5e-8] {
        let mut copy = value;
        let text = to_string(&mut copy).unwrap();
        let back: f64 = from_str(&text).unwrap();
        assert_eq!(back.to_bits(), value.to_bits(), "{}", text);
    }
}

#[test]
fn extreme_magnitudes_use_exponents() {
    for value in [1e300f64, -1e300, 2.5e-300] {
        let text = to_string(&mut value.clone()).unwrap();
        assert!(text.contains('e'), "{}", text);
        assert!(text.len() < 12, "{}", text);
    }
    let text = to_string(&mut f32::MAX).unwrap();
    assert!(text.contains('e'), "{}", text);
}

#[test]
fn boundary_values_round_trip() {
    let mut ints = [0i32, -1, i32::MIN, i32::MAX];
    let mut longs = [0i64, -1, i64::MIN, i64::MAX];
    let mut floats = [
        0.0f32,
        -0.0,
        f32::MIN,
        f32::MAX,
        f32::MIN_POSITIVE,
        f32::from_bits(1),
        f32::EPSILON,
    ];
    let mut doubles = [
        0.0f64,
        -0.0,
        f64::MIN,
        f64::MAX,
        f64::MIN_POSITIVE,
        f64::from_bits(1),
    ];
    let mut sizes = [0isize, isize::MIN, isize::MAX];

    let mut inspector = writer(Vec::new());
    ints.iter_mut().for_each(|v| inspector.i32(v));
    longs.iter_mut().for_each(|v| inspector.i64(v));
    floats
        .iter_mut()
        .for_each(|v| inspector.f32(v, FloatFormat::Shortest));
    doubles
        .iter_mut()
        .for_each(|v| inspector.f64(v, FloatFormat::Shortest));
    sizes.iter_mut().for_each(|v| inspector.isize(v));
    inspector.string(&mut String::new());
    inspector.bytes(&mut Vec::new());
    inspector.byte_string(&mut Vec::new());
    inspector.flush();
    let data = inspector.finish().unwrap().into_inner().into_inner().into_inner();

    let mut inspector = reader(&data[..]);
    for expected in ints {
        let mut v = 7;
        inspector.i32(&mut v);
        assert_eq!(v, expected);
    }
    for expected in longs {
        let mut v = 7;
        inspector.i64(&mut v);
        assert_eq!(v, expected);
    }
    for expected in floats {
        let mut v = 7.0f32;
        inspector.f32(&mut v, FloatFormat::Shortest);
        assert_eq!(v.to_bits(), expected.to_bits(), "{}", expected);
    }
    for expected in doubles {
        let mut v = 7.0f64;
        inspector.f64(&mut v, FloatFormat::Shortest);
        assert_eq!(v.to_bits(), expected.to_bits(), "{}", expected);
    }
    for expected in sizes {
        let mut v = 7;
        inspector.isize(&mut v);
        assert_eq!(v, expected);
    }
    let mut s = "stale".to_string();
    inspector.string(&mut s);
    assert_eq!(s, "");
    let mut b = vec![1, 2, 3];
    inspector.bytes(&mut b);
    assert!(b.is_empty());
    let mut b = vec![4, 5];
    inspector.byte_string(&mut b);
    assert!(b.is_empty());
    assert!(inspector.error().is_none());
}

#[test]
fn documents_are_whitespace_separated() {
    let mut inspector = writer(Vec::new());
    inspector.i32(&mut 1);
    inspector.string(&mut "two".to_string());
    inspector.flush();
    let data = inspector.finish().unwrap().into_inner().into_inner().into_inner();
    assert_eq!(data, b"1\n\"two\"");

    let mut inspector = reader(&data[..]);
    let mut number = 0;
    let mut text = String::new();
    inspector.i32(&mut number);
    inspector.string(&mut text);
    assert!(inspector.error().is_none());
    assert_eq!((number, text.as_str()), (1, "two"));

    inspector.i32(&mut number);
    assert_matches!(inspector.error(), Some(Error::Io(_)));
}

#[test]
fn token_mismatch() {
    assert_matches!(
        from_str::<i64>(r#""x""#),
        Err(Error::UnexpectedToken {
            expected: "integer",
            found: "string"
        })
    );
    assert_matches!(
        from_str::<i64>("1.5"),
        Err(Error::UnexpectedToken { expected: "integer", .. })
    );
    assert_matches!(
        from_str::<Vec<i64>>("{}"),
        Err(Error::UnexpectedToken {
            expected: "array",
            found: "object"
        })
    );
}

#[test]
fn malformed_and_missing_input() {
    assert_matches!(from_str::<Vec<i64>>("[1,"), Err(Error::Json(_)));
    assert_matches!(from_str::<i64>(""), Err(Error::Io(_)));

    let mut inspector = reader(r#""!!""#.as_bytes());
    inspector.bytes(&mut Vec::new());
    assert_matches!(inspector.error(), Some(Error::Base64(_)));
}

#[test]
fn raw_values_use_text_form() {
    let mut addr = IpAddr::V6(Ipv6Addr::LOCALHOST);
    let mut inspector = writer(Vec::new());
    inspector.value(&mut addr);
    inspector.flush();
    let data = inspector.finish().unwrap().into_inner().into_inner().into_inner();
    assert_eq!(data, b"\"::1\"");

    let mut inspector = reader(r#""not an address""#.as_bytes());
    inspector.value(&mut addr);
    assert_matches!(inspector.error(), Some(Error::Value(_)));
}

#[test]
fn arbitrary_key_map() {
    let mut map: HashMap<i64, String> = [(3, "three".to_string())].into_iter().collect();
    let mut inspector = writer(Vec::new());
    containers::map(&mut map, &mut inspector, "names", "key", "name", "");
    inspector.flush();
    let data = inspector.finish().unwrap().into_inner().into_inner().into_inner();
    assert_eq!(data, br#"[{"k":3,"v":"three"}]"#);

    let mut back = HashMap::new();
    back.insert(9, "stale".to_string());
    let mut inspector = reader(&data[..]);
    containers::map(&mut back, &mut inspector, "names", "key", "name", "");
    assert!(inspector.error().is_none());
    assert_eq!(back, map);
}

#[test]
fn flush_threshold_pushes_output() {
    let mut values = vec![1i32];

    let mut inspector = writer_with_options(Vec::new(), TextOptions { flush_threshold: 0 });
    values.inspect(&mut inspector);
    assert_eq!(inspector.get_ref().get_ref().get_ref().get_ref(), b"[1]");

    let mut inspector = writer(Vec::new());
    values.inspect(&mut inspector);
    assert!(inspector.get_ref().get_ref().get_ref().get_ref().is_empty());
    inspector.flush();
    assert_eq!(inspector.get_ref().get_ref().get_ref().get_ref(), b"[1]");
}
