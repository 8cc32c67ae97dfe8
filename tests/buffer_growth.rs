use csvshard::buffer::{RecordBuffer, MAX_PREALLOC};

#[test]
fn starts_empty_with_requested_capacity() {
    let buf = RecordBuffer::with_capacity(64);
    assert_eq!(buf.position(), 0);
    assert!(buf.capacity() >= 64);
    assert_eq!(buf.as_bytes(), b"");
}

#[test]
fn small_requests_grow_to_double() {
    let mut buf = RecordBuffer::with_capacity(16);
    buf.ensure_capacity(100);
    assert!(buf.capacity() >= 200);
}

#[test]
fn large_requests_grow_exactly() {
    let mut buf = RecordBuffer::with_capacity(16);
    let want = 2 * MAX_PREALLOC;
    buf.ensure_capacity(want);
    assert!(buf.capacity() >= want);
    // No doubling above the prealloc ceiling.
    assert!(buf.capacity() < 2 * want);
}

#[test]
fn ensure_capacity_below_current_is_a_noop() {
    let mut buf = RecordBuffer::with_capacity(256);
    let before = buf.capacity();
    buf.ensure_capacity(10);
    assert_eq!(buf.capacity(), before);
}

#[test]
fn push_byte_grows_past_initial_capacity() {
    let mut buf = RecordBuffer::with_capacity(4);
    for i in 0..1000u32 {
        buf.push_byte((i % 256) as u8);
    }
    assert_eq!(buf.position(), 1000);
    assert_eq!(buf.as_bytes()[999], (999 % 256) as u8);
}

#[test]
fn set_contents_overwrites_from_offset_zero() {
    let mut buf = RecordBuffer::with_capacity(8);
    buf.set_contents(b"hello world");
    assert_eq!(buf.as_bytes(), b"hello world");
    buf.set_contents(b"hi");
    assert_eq!(buf.position(), 2);
    assert_eq!(buf.as_bytes(), b"hi");
}

#[test]
fn duplicate_never_aliases_the_source() {
    let mut buf = RecordBuffer::with_capacity(8);
    buf.set_contents(b"abc");
    let copy = buf.duplicate();
    buf.set_contents(b"xyz");
    assert_eq!(copy, b"abc");
}

#[test]
fn duplicate_up_to_clamps_to_position() {
    let mut buf = RecordBuffer::with_capacity(8);
    buf.set_contents(b"abcdef");
    assert_eq!(buf.duplicate_up_to(3), b"abc");
    assert_eq!(buf.duplicate_up_to(100), b"abcdef");
}

#[test]
fn discard_front_keeps_the_tail() {
    let mut buf = RecordBuffer::with_capacity(8);
    buf.set_contents(b"abcdef");
    buf.discard_front(4);
    assert_eq!(buf.as_bytes(), b"ef");
    assert_eq!(buf.position(), 2);
}

#[test]
fn clear_retains_capacity() {
    let mut buf = RecordBuffer::with_capacity(8);
    buf.set_contents(b"some data here");
    let cap = buf.capacity();
    buf.clear();
    assert_eq!(buf.position(), 0);
    assert_eq!(buf.capacity(), cap);
}

#[test]
fn plain_fields_are_written_verbatim() {
    let mut buf = RecordBuffer::with_capacity(8);
    buf.push_escaped(b"plain", b',');
    assert_eq!(buf.as_bytes(), b"plain");
}

#[test]
fn fields_with_special_bytes_are_quoted() {
    let mut buf = RecordBuffer::with_capacity(4);
    buf.push_escaped(b"a,b", b',');
    buf.push_byte(b',');
    buf.push_escaped(b"say \"hi\"", b',');
    buf.push_byte(b',');
    buf.push_escaped(b"line\nbreak", b',');
    assert_eq!(buf.as_bytes(), b"\"a,b\",\"say \"\"hi\"\"\",\"line\nbreak\"");
}

#[test]
fn delimiter_awareness_tracks_the_configured_byte() {
    let mut buf = RecordBuffer::with_capacity(8);
    // A comma is nothing special when the delimiter is a tab.
    buf.push_escaped(b"a,b", b'\t');
    assert_eq!(buf.as_bytes(), b"a,b");
    buf.clear();
    buf.push_escaped(b"a\tb", b'\t');
    assert_eq!(buf.as_bytes(), b"\"a\tb\"");
}
