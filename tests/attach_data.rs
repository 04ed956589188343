use vtkwrite::{Compression, Encoding, Error, GridType, Payload, Placement, VtkDocument};

fn doc_with_piece(
    encoding: Encoding,
    compression: Compression,
    points: usize,
    cells: usize,
) -> VtkDocument {
    let mut doc = VtkDocument::new(GridType::RectilinearGrid, points, cells)
        .encoding(encoding)
        .compression(compression);
    doc.add_piece(None);
    doc
}

#[test]
fn inferred_point_placement_sets_components() {
    let mut doc = doc_with_piece(Encoding::Appended, Compression::None, 4, 3);

    let values = vec![1.0_f64; 12];
    let node = doc
        .attach_data(&Payload::from(&values), "velocity", None)
        .unwrap();

    assert_eq!(node.name(), "DataArray");
    assert_eq!(node.attribute("type"), Some("Float64"));
    assert_eq!(node.attribute("Name"), Some("velocity"));
    assert_eq!(node.attribute("NumberOfComponents"), Some("3"));
    assert_eq!(node.attribute("format"), Some("appended"));
    assert_eq!(node.attribute("offset"), Some("0"));
    // NumberOfTuples is a field-data attribute only
    assert_eq!(node.attribute("NumberOfTuples"), None);

    let piece = doc.root().child("Piece").unwrap();
    assert_eq!(piece.child("PointData").unwrap().children().len(), 1);
}

#[test]
fn uncompressed_appended_header_is_a_single_u32() {
    let mut doc = doc_with_piece(Encoding::Appended, Compression::None, 2, 1);

    let values = vec![1.0_f32, 2.0];
    doc.attach_data(&Payload::from(&values), "u", Some(Placement::Point))
        .unwrap();

    let buf = doc.append_buffer().as_slice();
    assert_eq!(buf.len(), 4 + 8);
    assert_eq!(u32::from_le_bytes(buf[..4].try_into().unwrap()), 8);
    assert_eq!(&buf[4..8], &1.0_f32.to_le_bytes());
    assert_eq!(&buf[8..12], &2.0_f32.to_le_bytes());
}

#[test]
fn second_array_offset_follows_the_first() {
    let mut doc = doc_with_piece(Encoding::Appended, Compression::None, 2, 1);

    let u = vec![1.0_f32, 2.0];
    let v = vec![3.0_f32, 4.0];
    doc.attach_data(&Payload::from(&u), "u", Some(Placement::Point))
        .unwrap();
    let node = doc
        .attach_data(&Payload::from(&v), "v", Some(Placement::Point))
        .unwrap();

    // header (4) + payload (8) of the first array
    assert_eq!(node.attribute("offset"), Some("12"));

    let piece = doc.root().child("Piece").unwrap();
    assert_eq!(piece.child("PointData").unwrap().children().len(), 2);
}

#[test]
fn compressed_appended_block_bookkeeping() {
    let mut doc = doc_with_piece(Encoding::Appended, Compression::zlib(6), 0, 0);

    let values: Vec<f64> = (0..256).map(|i| (i % 16) as f64).collect();
    doc.attach_data(&Payload::from(&values), "samples", Some(Placement::Field))
        .unwrap();

    let buf = doc.append_buffer().as_slice();
    let words: Vec<u32> = buf[..16]
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes(c.try_into().unwrap()))
        .collect();

    // [numBlocks, blockSize, lastBlockSize, compressedBlockSize]
    assert_eq!(words[0], 1);
    assert_eq!(words[1], 2048);
    assert_eq!(words[2], 2048);
    assert_eq!(words[3] as usize, buf.len() - 16);
    assert!(words[3] <= words[1] + 64);

    let raw = miniz_oxide::inflate::decompress_to_vec_zlib(&buf[16..]).unwrap();
    let decoded: Vec<f64> = raw
        .chunks_exact(8)
        .map(|c| f64::from_le_bytes(c.try_into().unwrap()))
        .collect();
    assert_eq!(decoded, values);
}

#[test]
fn compressed_output_is_deterministic() {
    let values: Vec<f64> = (0..512).map(|i| (i as f64).sin()).collect();

    let mut first = doc_with_piece(Encoding::Appended, Compression::zlib(4), 0, 0);
    let mut second = doc_with_piece(Encoding::Appended, Compression::zlib(4), 0, 0);
    first
        .attach_data(&Payload::from(&values), "w", Some(Placement::Field))
        .unwrap();
    second
        .attach_data(&Payload::from(&values), "w", Some(Placement::Field))
        .unwrap();

    assert_eq!(
        first.append_buffer().as_slice(),
        second.append_buffer().as_slice()
    );
}

#[test]
fn inline_header_and_payload_are_independent_base64_runs() {
    let mut doc = doc_with_piece(Encoding::Base64, Compression::None, 2, 1);

    let values = vec![1.0_f32, 2.0];
    let node = doc
        .attach_data(&Payload::from(&values), "u", Some(Placement::Point))
        .unwrap();

    assert_eq!(node.attribute("format"), Some("binary"));
    assert_eq!(node.attribute("offset"), None);

    let mut payload_bytes = Vec::new();
    payload_bytes.extend_from_slice(&1.0_f32.to_le_bytes());
    payload_bytes.extend_from_slice(&2.0_f32.to_le_bytes());

    let expected = format!(
        "\n{}{}\n",
        base64::encode(8_u32.to_le_bytes()),
        base64::encode(&payload_bytes)
    );
    assert_eq!(node.text(), Some(expected.as_str()));

    // nothing lands in the append buffer in inline mode
    assert!(doc.append_buffer().is_empty());
}

#[test]
fn inline_compressed_header_decodes_on_its_own() {
    let mut doc = doc_with_piece(Encoding::Base64, Compression::zlib(9), 0, 0);

    let values = vec![0.0_f64; 100];
    let node = doc
        .attach_data(&Payload::from(&values), "zeros", Some(Placement::Field))
        .unwrap();

    let text = node.text().unwrap().trim();
    // the header run is 16 bytes -> 24 base64 characters, independently padded
    let header = base64::decode(&text[..24]).unwrap();
    let words: Vec<u32> = header
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes(c.try_into().unwrap()))
        .collect();
    assert_eq!(words[0], 1);
    assert_eq!(words[1], 800);
    assert_eq!(words[2], 800);

    let block = base64::decode(&text[24..]).unwrap();
    assert_eq!(words[3] as usize, block.len());

    let raw = miniz_oxide::inflate::decompress_to_vec_zlib(&block).unwrap();
    assert_eq!(raw.len(), 800);
}

#[test]
fn string_field_data_uses_the_array_tag() {
    let mut doc = VtkDocument::new(GridType::UnstructuredGrid, 0, 0);

    let node = doc
        .attach_data(&Payload::from("hello"), "title", Some(Placement::Field))
        .unwrap();

    assert_eq!(node.name(), "Array");
    assert_eq!(node.attribute("type"), Some("String"));
    assert_eq!(node.attribute("NumberOfComponents"), Some("1"));
    assert_eq!(node.attribute("NumberOfTuples"), Some("1"));

    let buf = doc.append_buffer().as_slice();
    assert_eq!(u32::from_le_bytes(buf[..4].try_into().unwrap()), 6);
    assert_eq!(&buf[4..], b"hello\0");

    // field data attaches at the grid level, no piece required
    assert!(doc.root().child("FieldData").is_some());
}

#[test]
fn scalar_payloads_infer_field_placement() {
    let mut doc = doc_with_piece(Encoding::Appended, Compression::None, 4, 3);

    let node = doc.attach_data(&Payload::from(0.5_f64), "time", None).unwrap();
    assert_eq!(node.attribute("NumberOfTuples"), Some("1"));
    assert!(doc.root().child("FieldData").is_some());
}

#[test]
fn tuple_of_component_arrays_interleaves() {
    let mut doc = doc_with_piece(Encoding::Appended, Compression::None, 2, 1);

    let a = vec![1.0_f64, 2.0];
    let b = vec![10.0_f64, 20.0];
    let c = vec![100.0_f64, 200.0];
    let node = doc
        .attach_data(
            &Payload::tuple([a.as_slice(), b.as_slice(), c.as_slice()]),
            "velocity",
            None,
        )
        .unwrap();

    assert_eq!(node.attribute("NumberOfComponents"), Some("3"));

    let buf = doc.append_buffer().as_slice();
    let decoded: Vec<f64> = buf[4..]
        .chunks_exact(8)
        .map(|c| f64::from_le_bytes(c.try_into().unwrap()))
        .collect();
    assert_eq!(decoded, [1.0, 10.0, 100.0, 2.0, 20.0, 200.0]);
}

#[test]
fn point_data_without_a_piece_is_a_structural_error() {
    let mut doc = VtkDocument::new(GridType::ImageData, 4, 0);

    let values = vec![0.0_f64; 4];
    let err = doc
        .attach_data(&Payload::from(&values), "u", Some(Placement::Point))
        .unwrap_err();

    assert!(matches!(err, Error::Structural { .. }));
}

#[test]
fn indivisible_payload_is_a_shape_mismatch() {
    let mut doc = doc_with_piece(Encoding::Appended, Compression::None, 4, 3);

    let values = vec![0.0_f64; 10];
    let err = doc
        .attach_data(&Payload::from(&values), "u", Some(Placement::Point))
        .unwrap_err();

    assert!(matches!(err, Error::ShapeMismatch { len: 10, count: 4, .. }));
    // shape errors are caught before any bytes are reserved
    assert!(doc.append_buffer().is_empty());
}

#[test]
fn ascii_encoding_writes_text() {
    let mut doc = doc_with_piece(Encoding::Ascii, Compression::None, 2, 1);

    let values = vec![1.0_f64, 2.5];
    let node = doc
        .attach_data(&Payload::from(&values), "u", Some(Placement::Point))
        .unwrap();

    assert_eq!(node.attribute("format"), Some("ascii"));
    assert_eq!(node.text(), Some("1.0 2.5 "));
    assert!(doc.append_buffer().is_empty());
}

#[test]
fn ascii_encoding_falls_back_to_base64_for_strings() {
    let mut doc = VtkDocument::new(GridType::RectilinearGrid, 0, 0).encoding(Encoding::Ascii);

    let node = doc
        .attach_data(&Payload::from("name"), "label", Some(Placement::Field))
        .unwrap();

    assert_eq!(node.attribute("format"), Some("binary"));
    assert!(node.text().is_some());
}

#[test]
fn cell_data_attaches_under_cell_data_node() {
    let mut doc = doc_with_piece(Encoding::Appended, Compression::None, 4, 3);

    let values = vec![7_u8, 8, 9];
    let node = doc.attach_data(&Payload::from(&values), "flags", None).unwrap();

    assert_eq!(node.attribute("type"), Some("UInt8"));
    let piece = doc.root().child("Piece").unwrap();
    assert!(piece.child("CellData").is_some());
    assert!(piece.child("PointData").is_none());
}
