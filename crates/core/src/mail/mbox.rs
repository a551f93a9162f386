//! MBOX container (spec §4.6): split on the RFC 4155 `"\nFrom "` message
//! boundary and re-enqueue each message as a child EML job. No text is
//! searched directly here — each child is classified and scanned as EML
//! in its own right, with its own provenance.

use crate::job::Job;

/// Split an mbox payload into per-message byte slices. The leading `From `
/// line of each message (the mbox envelope separator) is kept attached
/// since `MailDecoder` tolerates and ignores the extra header-shaped line.
fn split_messages(payload: &[u8]) -> Vec<&[u8]> {
    const BOUNDARY: &[u8] = b"\nFrom ";

    if payload.is_empty() {
        return Vec::new();
    }

    let mut starts = vec![0usize];
    let mut i = 0;
    while let Some(pos) = find(&payload[i..], BOUNDARY) {
        let boundary_start = i + pos + 1; // skip the leading '\n', keep "From "
        starts.push(boundary_start);
        i = boundary_start;
    }

    let mut messages = Vec::with_capacity(starts.len());
    for window in starts.windows(2) {
        messages.push(&payload[window[0]..window[1]]);
    }
    if let Some(&last) = starts.last() {
        messages.push(&payload[last..]);
    }
    messages.into_iter().filter(|m| !m.is_empty()).collect()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Build one child `.eml` job per message found in `job`'s payload.
pub fn extract_children(job: &Job) -> Vec<Job> {
    split_messages(job.payload())
        .into_iter()
        .enumerate()
        .map(|(idx, bytes)| job.child(format!("message-{idx}.eml"), bytes.to_vec()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_two_messages_on_from_boundary() {
        let mbox = b"From a@b.com Mon Jan  1\r\nheader1\r\n\r\nbody1\r\n\
                     From c@d.com Tue Jan  2\r\nheader2\r\n\r\nbody2\r\n";
        let messages = split_messages(mbox);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with(b"From a@b.com"));
        assert!(messages[1].starts_with(b"From c@d.com"));
    }

    #[test]
    fn empty_mbox_yields_no_children() {
        let job = Job::new("empty.mbox", "/mail", vec![]);
        assert!(extract_children(&job).is_empty());
    }

    #[test]
    fn children_carry_provenance_of_parent_mbox() {
        let job = Job::new("archive.mbox", "/mail", b"From a@b.com\r\n\r\nbody".to_vec());
        let children = extract_children(&job);
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].dirname, job.abspath());
    }
}
