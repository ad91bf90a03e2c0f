//! Pair tables and codec properties exercised through the public API only.

use bencoding::{
    decoding::{Decoder, Error as DecodingError},
    encoding::{Error as EncodingError, ToBencode},
    Dict, Value,
};

// -----------------------------------------------------------------------------
// Macros
// -----------------------------------------------------------------------------

macro_rules! list(
    {} => { Value::List(Vec::new()) };
    { $($value:expr),+ } => {
        {
            let mut list = Vec::new();
            $( list.push(Value::from($value)); )+

            Value::List(list)
        }
     };
);

macro_rules! map(
    {} => { Value::Dict(Dict::new()) };
    { $($key:expr => $value:expr),+ } => {
        {
            let mut map = Dict::new();
            $( map.insert($key.as_bytes().to_vec(), Value::from($value)); )+

            Value::Dict(map)
        }
     };
);

fn check_pairs(pairs: &[(Value, &str)]) -> Result<(), Error> {
    for (original, expected_encoding) in pairs {
        let encoded = original.to_bencode()?;
        assert_eq!(expected_encoding.as_bytes(), encoded.as_slice());

        let decoded = Value::from_bencode(&encoded)?;
        assert_eq!(original, &decoded);
    }

    Ok(())
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[test]
fn string_test_pairs() -> Result<(), Error> {
    check_pairs(&[
        (Value::from(""), "0:"),
        (Value::from("hello"), "5:hello"),
        (Value::from("goodbye"), "7:goodbye"),
        (Value::from("hello world"), "11:hello world"),
        (Value::from("1-5%3~]+=\\| []>.,`??"), "20:1-5%3~]+=\\| []>.,`??"),
    ])
}

#[test]
fn integer_test_pairs() -> Result<(), Error> {
    check_pairs(&[
        (Value::Integer(0), "i0e"),
        (Value::Integer(5), "i5e"),
        (Value::Integer(-5), "i-5e"),
        (Value::Integer(1234567890), "i1234567890e"),
        (Value::Integer(-1234567890), "i-1234567890e"),
        (Value::Integer(i64::MAX), "i9223372036854775807e"),
        (Value::Integer(i64::MIN), "i-9223372036854775808e"),
    ])
}

#[test]
fn list_test_pairs() -> Result<(), Error> {
    check_pairs(&[
        (list![], "le"),
        (list!["abra", "cadabra"], "l4:abra7:cadabrae"),
        (list!["spam", "eggs"], "l4:spam4:eggse"),
        (
            list![list!["list", "of", "lists"], list!["like", "omygawd!"]],
            "ll4:list2:of5:listsel4:like8:omygawd!ee",
        ),
    ])
}

#[test]
fn map_test_pairs() -> Result<(), Error> {
    check_pairs(&[
        (map! {}, "de"),
        (
            map! {"cow" => "moo", "spam" => "eggs"},
            "d3:cow3:moo4:spam4:eggse",
        ),
        (
            map! {"dog" => "bark", "cow" => "moo"},
            "d3:dog4:bark3:cow3:mooe",
        ),
        (
            map! {"first" => "first", "2ace" => "second", "3ace" => "third"},
            "d5:first5:first4:2ace6:second4:3ace5:thirde",
        ),
        (
            map! {"Goodbye" => map! {"maps" => "that don't work", "number" => 100}},
            "d7:Goodbyed4:maps15:that don't work6:numberi100eee",
        ),
    ])
}

#[test]
fn mixed_use_list_pairs() -> Result<(), Error> {
    check_pairs(&[(
        list![0, "heterogeneous", -5, "lists", 10, map! {"map" => "well"}],
        "li0e13:heterogeneousi-5e5:listsi10ed3:map4:wellee",
    )])
}

#[test]
fn mixed_use_dict_pairs() -> Result<(), Error> {
    check_pairs(&[
        (
            map! {
                "hello" => list!["world!", "gaia!", "mother earth!"],
                "Goodbye" => map! {"maps" => "that don't work", "number" => 100}
            },
            "d5:hellol6:world!5:gaia!13:mother earth!e7:Goodbyed4:maps15:that don't work6:numberi100eee",
        ),
        (
            map! {"hello" => list!["world!", "gaia!", "mother earth!"]},
            "d5:hellol6:world!5:gaia!13:mother earth!ee",
        ),
    ])
}

#[test]
fn binary_payloads_round_trip() -> Result<(), Error> {
    let payload: Vec<u8> = (0..=255).collect();
    let value = list![payload.clone(), Value::Bytes(b"i1e:3le".to_vec())];

    let encoded = value.to_bencode()?;
    assert!(encoded.starts_with(b"l256:"));
    assert_eq!(Value::from_bencode(&encoded)?, value);
    Ok(())
}

#[test]
fn encoding_is_deterministic() -> Result<(), Error> {
    let value = map! {"b" => list![1, 2], "a" => "x"};
    assert_eq!(value.to_bencode()?, value.to_bencode()?);

    let bytes = b"d1:bli1ei2ee1:a1:xe";
    assert_eq!(bencoding::decode(bytes)?, bencoding::decode(bytes)?);
    Ok(())
}

#[test]
fn decode_then_encode_reproduces_input() -> Result<(), Error> {
    let inputs: [&[u8]; 4] = [
        b"d1:b1:11:a1:2e",
        b"d8:announce26:http://tracker.example/ann4:infod6:lengthi1024e4:name5:a.txtee",
        b"ll0:ed0:0:ee",
        b"i-1e",
    ];
    for input in inputs {
        let value = bencoding::decode(input)?;
        assert_eq!(bencoding::encode(&value)?, input);
    }
    Ok(())
}

#[test]
fn empty_containers() -> Result<(), Error> {
    assert_eq!(bencoding::decode(b"le")?, Value::List(Vec::new()));
    assert_eq!(bencoding::decode(b"de")?, Value::Dict(Dict::new()));
    assert_eq!(bencoding::decode(b"0:")?, Value::Bytes(Vec::new()));
    Ok(())
}

#[test]
fn negative_integers() -> Result<(), Error> {
    assert_eq!(bencoding::decode(b"i-42e")?, Value::Integer(-42));
    assert_eq!(bencoding::encode(&Value::Integer(-42))?, b"i-42e");
    Ok(())
}

#[test]
fn truncation_is_detected() {
    let err = bencoding::decode(b"5:ab").unwrap_err();
    assert!(matches!(err, DecodingError::TruncatedInput { .. }));
}

#[test]
fn unknown_tag_is_malformed() {
    let err = bencoding::decode(b"x").unwrap_err();
    assert!(matches!(err, DecodingError::MalformedInput { offset: 0, .. }));
}

#[test]
fn nested_structure() -> Result<(), Error> {
    assert_eq!(
        bencoding::decode(b"d3:keyl1:a1:bee")?,
        map! {"key" => list!["a", "b"]}
    );
    Ok(())
}

#[test]
fn dictionary_order_is_preserved() -> Result<(), Error> {
    let value = bencoding::decode(b"d1:b1:11:a1:2e")?;
    let keys: Vec<&[u8]> = value
        .as_dict()
        .expect("decoded a dictionary")
        .keys()
        .map(Vec::as_slice)
        .collect();
    assert_eq!(keys, vec![&b"b"[..], &b"a"[..]]);
    Ok(())
}

#[test]
fn sequential_values_share_one_decoder() -> Result<(), Error> {
    let mut decoder = Decoder::new(b"i1el1:xed1:ai2ee");
    assert_eq!(decoder.decode()?, Value::Integer(1));
    assert_eq!(decoder.decode()?, list!["x"]);
    assert_eq!(decoder.decode()?, map! {"a" => 2});
    assert!(decoder.is_exhausted());
    assert!(decoder.decode().is_err());
    Ok(())
}

#[test]
fn strict_decode_rejects_trailing_bytes() {
    assert!(bencoding::decode(b"i1ejunk").is_ok());
    assert!(Value::from_bencode(b"i1ejunk").is_err());
}

// -----------------------------------------------------------------------------
// Error
// -----------------------------------------------------------------------------

#[derive(Debug)]
enum Error {
    DecodingError(DecodingError),
    EncodingError(EncodingError),
}

impl From<DecodingError> for Error {
    fn from(error: DecodingError) -> Self {
        Error::DecodingError(error)
    }
}

impl From<EncodingError> for Error {
    fn from(error: EncodingError) -> Self {
        Error::EncodingError(error)
    }
}
