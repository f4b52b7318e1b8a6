#![no_main]

use arbitrary::Arbitrary;
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use packbuf_codec::{array, BufferView, Error, FixedWriter, Layout};

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    chunks: Vec<Vec<u8>>,
    alignment: u8,
    skip_last_element_padding: bool,
    trailing: u8,
}

fn roundtrip_layout(elements: &[Bytes], layout: Layout) {
    let size = layout.total_size(elements);
    let mut writer = FixedWriter::new(size);
    layout
        .write(&mut writer, elements)
        .expect("Failed to write elements sized by total_size!");
    let encoded = writer
        .into_storage()
        .expect("total_size did not match the written length!");

    let mut sizes = elements.iter().map(|e| e.len());
    let mut view = BufferView::wrap(encoded);
    let decoded = layout
        .read(&mut view, |view| {
            let size = sizes.next().ok_or(Error::EndOfBuffer)?;
            view.read_bytes(size)
        })
        .expect("Failed to read back written elements!");
    assert_eq!(decoded, elements);
    assert!(view.is_empty());
}

fn roundtrip_sorted(elements: &[Bytes]) {
    // Elements are non-empty, so every one has a leading byte to key on
    let key = |e: &Bytes| [e[0]];
    let sorted = elements.windows(2).all(|pair| pair[0][0] < pair[1][0]);

    let mut sink: Vec<u8> = Vec::new();
    match array::write_array_sorted(&mut sink, elements, key) {
        Ok(()) => assert!(sorted),
        Err(Error::UnsortedWrite) => {
            assert!(!sorted);
            assert!(sink.is_empty());
            return;
        }
        Err(err) => panic!("unexpected error: {err}"),
    }

    let mut sizes = elements.iter().map(|e| e.len());
    let mut view = BufferView::wrap(sink);
    let decoded = array::read_array_sorted(
        &mut view,
        |view| {
            let size = sizes.next().ok_or(Error::EndOfBuffer)?;
            view.read_bytes(size)
        },
        key,
    )
    .expect("Failed to read back sorted elements!");
    assert_eq!(decoded, elements);
}

fn fuzz(input: FuzzInput) {
    // Zero-sized elements are rejected, so drop empty chunks
    let elements: Vec<Bytes> = input
        .chunks
        .into_iter()
        .filter(|chunk| !chunk.is_empty())
        .map(Bytes::from)
        .collect();

    let mut layout = Layout::aligned(input.alignment as usize);
    if input.skip_last_element_padding {
        layout = layout.skip_last_element_padding();
    }
    roundtrip_layout(&elements, layout);
    roundtrip_layout(&elements, Layout::packed());
    roundtrip_sorted(&elements);

    // Reading an unpadded tail with padding required must never panic
    if input.alignment > 1 {
        let mut sink: Vec<u8> = Vec::new();
        array::write_array(&mut sink, &elements).expect("Failed to write elements!");
        sink.truncate(sink.len().saturating_sub(input.trailing as usize));
        let mut sizes = elements.iter().map(|e| e.len());
        let mut view = BufferView::wrap(sink);
        let _ = array::read_variable_size_elements(
            &mut view,
            |view| {
                let size = sizes.next().ok_or(Error::EndOfBuffer)?;
                view.read_bytes(size)
            },
            input.alignment as usize,
            false,
        );
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
