//! End-to-end behaviour of the public API.

use lfc_tx::{
    Input, Node, Output, ResolveError, SchemaVersion, Transaction, TransactionBuilder,
    ValidationError, compute_cid, decode_transaction, decode_transaction_with_schema,
    encode_fields, encode_transaction, is_valid, resolve, resolve_with_schema, tree, validate,
};
use proptest::prelude::*;
use serde_json::{Value, json};

fn zeros() -> String {
    "0".repeat(64)
}

fn sample(schema: SchemaVersion) -> Transaction {
    TransactionBuilder::new(zeros(), 1_600_000_000_000)
        .schema(schema)
        .reward("minted")
        .input(Input::new(0, zeros(), 150, zeros(), zeros()))
        .output(Output::new(0, 150, zeros()))
        .build()
}

fn top_level_fields(bytes: &[u8], schema: SchemaVersion) -> usize {
    lfc_tx::codec::decode_node(bytes, schema).unwrap().len()
}

#[test]
fn sample_transaction_v2() {
    let tx = sample(SchemaVersion::V2);
    let bytes = encode_transaction(&tx).unwrap();
    assert_eq!(bytes.len(), 364);
    assert_eq!(top_level_fields(&bytes, SchemaVersion::V2), 6);
    assert_eq!(decode_transaction(&bytes).unwrap(), tx);

    assert_eq!(validate(&tx), Ok(()));
    assert!(is_valid(&tx));

    let res = resolve(&bytes, "reward").unwrap();
    assert_eq!(res.value, Node::String("minted".to_string()));
    assert_eq!(res.remainder_path, "");
}

#[test]
fn sample_transaction_v1() {
    let tx = sample(SchemaVersion::V1);
    let bytes = encode_transaction(&tx).unwrap();
    assert_eq!(bytes.len(), 360);
    assert_eq!(top_level_fields(&bytes, SchemaVersion::V1), 5);
    assert_eq!(decode_transaction_with_schema(&bytes, SchemaVersion::V1).unwrap(), tx);
    assert!(is_valid(&tx));

    let res = resolve_with_schema(&bytes, "reward", SchemaVersion::V1).unwrap();
    assert_eq!(res.value.as_str(), Some("minted"));
}

#[test]
fn omitted_inputs_decode_as_empty() {
    let fields = json!({
        "id": zeros(),
        "time": 1_600_000_000_000u64,
        "reward": "minted",
        "outputs": [{ "index": 0, "amount": 150, "address": zeros() }],
    });
    let bytes = encode_fields(&fields, SchemaVersion::V2).unwrap();
    let tx = decode_transaction(&bytes).unwrap();
    assert!(tx.inputs().is_empty());
    assert_eq!(resolve(&bytes, "inputs").unwrap().value, Node::List(vec![]));
    assert_eq!(tx.to_json()["inputs"], json!([]));
}

#[test]
fn field_map_and_typed_transaction_agree() {
    let tx = sample(SchemaVersion::V2);
    let from_fields = Transaction::from_fields(&tx.to_json()).unwrap();
    assert_eq!(from_fields, tx);
    assert_eq!(
        encode_fields(&tx.to_json(), SchemaVersion::V2).unwrap(),
        encode_transaction(&tx).unwrap()
    );
}

#[test]
fn cid_of_sample() {
    let tx = sample(SchemaVersion::V2);
    let bytes = tx.serialize().unwrap();
    let cid = tx.cid().unwrap();
    assert_eq!(cid, compute_cid(&bytes));
    assert!(cid.verify(&bytes));
    assert_eq!(cid.codec(), 0x1c01);
    assert_ne!(cid, sample(SchemaVersion::V1).cid().unwrap());
}

#[test]
fn unknown_path_names_the_field() {
    let bytes = sample(SchemaVersion::V2).serialize().unwrap();
    match resolve(&bytes, "outputs/0/memo") {
        Err(ResolveError::MissingField { field, record }) => {
            assert_eq!(field, "memo");
            assert_eq!(record, "LFCOutput");
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn display_reports_size() {
    let tx = sample(SchemaVersion::V2);
    assert!(tx.to_string().ends_with("size: 364>"));
    assert!(tx.outputs()[0].to_string().starts_with("LFCOutput <index: \"0\""));
}

#[test]
fn non_object_candidates_are_invalid() {
    for candidate in [json!(null), json!(5), json!([]), json!("LFCTx"), json!(true)] {
        assert!(!is_valid(&candidate), "{candidate}");
        assert!(matches!(
            validate(&candidate),
            Err(ValidationError::NotAnObject { ref path, .. }) if path == "LFCTx"
        ));
    }
}

#[test]
fn public_types_are_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<Transaction>();
    assert_send_sync::<Input>();
    assert_send_sync::<Output>();
    assert_send_sync::<Node>();
    assert_send_sync::<lfc_tx::Paths>();
    assert_send_sync::<lfc_tx::TxCid>();
    assert_send_sync::<lfc_tx::Resolution>();
    assert_send_sync::<ValidationError>();
}

// =============================================================================
// PROPERTIES
// =============================================================================

fn hex_hash() -> impl Strategy<Value = String> {
    "[0-9a-f]{64}"
}

fn input() -> impl Strategy<Value = Input> {
    (any::<u64>(), hex_hash(), any::<u64>(), "[a-zA-Z0-9]{1,70}", "[0-9a-f]{2,130}")
        .prop_map(|(index, tx, amount, address, sig)| Input::new(index, tx, amount, address, sig))
}

fn output() -> impl Strategy<Value = Output> {
    (any::<u64>(), any::<u64>(), "[a-zA-Z0-9]{1,70}")
        .prop_map(|(index, amount, address)| Output::new(index, amount, address))
}

fn schema() -> impl Strategy<Value = SchemaVersion> {
    prop_oneof![Just(SchemaVersion::V1), Just(SchemaVersion::V2)]
}

fn transaction() -> impl Strategy<Value = Transaction> {
    (
        schema(),
        hex_hash(),
        any::<u64>(),
        prop_oneof![Just("mined"), Just("minted"), Just("0x")],
        prop::collection::vec(input(), 0..4),
        prop::collection::vec(output(), 1..4),
    )
        .prop_map(|(schema, id, time, reward, inputs, outputs)| {
            TransactionBuilder::new(id, time)
                .schema(schema)
                .reward(reward)
                .inputs(inputs)
                .outputs(outputs)
                .build()
        })
}

/// Field maps that are sometimes valid and sometimes not.
fn field_map() -> impl Strategy<Value = Value> {
    (
        prop_oneof![hex_hash().prop_map(Value::from), Just(json!("short")), Just(json!(5))],
        prop_oneof![Just(json!(1)), Just(json!("12")), Just(json!("later")), Just(Value::Null)],
        prop_oneof![Just(json!("mined")), Just(json!("")), Just(json!("stolen"))],
        prop_oneof![Just(json!("ff")), Just(json!("0x")), Just(json!("zz"))],
        prop_oneof![Just(json!(0)), Just(json!(1.5)), Just(json!("x"))],
        0usize..3,
    )
        .prop_map(|(id, time, reward, signature, amount, outputs)| {
            let outputs: Vec<Value> = (0..outputs)
                .map(|i| json!({ "index": i, "amount": amount, "address": "a" }))
                .collect();
            json!({
                "id": id,
                "time": time,
                "reward": reward,
                "inputs": [{
                    "index": 0, "tx": "0".repeat(64), "amount": 1, "address": "a",
                    "signature": signature
                }],
                "outputs": outputs,
            })
        })
}

proptest! {
    #[test]
    fn prop_roundtrip(tx in transaction()) {
        let bytes = encode_transaction(&tx).unwrap();
        let decoded = decode_transaction_with_schema(&bytes, tx.schema()).unwrap();
        prop_assert_eq!(&decoded, &tx);
        prop_assert_eq!(encode_transaction(&decoded).unwrap(), bytes);
    }

    #[test]
    fn prop_generated_transactions_validate(tx in transaction()) {
        prop_assert_eq!(validate(&tx), Ok(()));
    }

    #[test]
    fn prop_cid_deterministic(tx in transaction(), bit in 0usize..64) {
        let bytes = tx.serialize().unwrap();
        prop_assert_eq!(compute_cid(&bytes), compute_cid(&bytes.clone()));

        let mut flipped = bytes.clone();
        let byte = bit / 8 % flipped.len();
        flipped[byte] ^= 1 << (bit % 8);
        prop_assert_ne!(compute_cid(&bytes), compute_cid(&flipped));
    }

    #[test]
    fn prop_is_valid_matches_validate(fields in field_map()) {
        prop_assert_eq!(is_valid(&fields), validate(&fields).is_ok());
    }

    #[test]
    fn prop_bad_id_length_fails(tx in transaction(), id in "[0-9a-f]{0,63}|[0-9a-f]{65,90}") {
        let mut fields = tx.to_json();
        fields["id"] = Value::from(id.clone());
        match validate(&fields) {
            Err(ValidationError::LengthMismatch { path, expected, actual }) => {
                prop_assert_eq!(path, "LFCTx.id");
                prop_assert_eq!(expected, 64);
                prop_assert_eq!(actual, id.len());
            }
            other => prop_assert!(false, "unexpected: {:?}", other),
        }
    }

    #[test]
    fn prop_empty_outputs_fail(tx in transaction()) {
        let mut fields = tx.to_json();
        fields["outputs"] = json!([]);
        let is_no_outputs = matches!(validate(&fields), Err(ValidationError::NoOutputs { .. }));
        prop_assert!(is_no_outputs);
    }

    #[test]
    fn prop_tree_deterministic(tx in transaction()) {
        let bytes = tx.serialize().unwrap();
        if tx.schema() == SchemaVersion::V2 {
            let first: Vec<String> = tree(&bytes).unwrap().collect();
            let second: Vec<String> = tree(&bytes).unwrap().collect();
            prop_assert_eq!(&first, &second);
            let expected = 4 + 1 + tx.inputs().len() * 6 + 1 + tx.outputs().len() * 4;
            prop_assert_eq!(first.len(), expected);
        }
    }

    #[test]
    fn prop_root_resolves_to_record(tx in transaction()) {
        let bytes = tx.serialize().unwrap();
        let whole = resolve_with_schema(&bytes, "/", tx.schema()).unwrap();
        prop_assert_eq!(whole.remainder_path, "");
        prop_assert_eq!(
            Transaction::from_node(&whole.value, tx.schema()).unwrap(),
            tx
        );
    }
}
