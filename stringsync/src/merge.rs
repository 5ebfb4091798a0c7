//! Reconciles an existing table with a freshly extracted one.

use crate::record::Table;

/// Merges `old` (the table on disk) with `new` (the freshly extracted
/// table) into a reconciled table.
///
/// Rules, per key:
/// - In both, old raw: the new record wins, value and comment.
/// - In both, old translated: the old value sticks, the new comment is
///   adopted to reflect updated source context.
/// - Only in old: dropped. Stale entries are pruned, not preserved.
/// - Only in new: copied unchanged.
///
/// With `keep_comment` the old comment is preserved whenever the key
/// existed in `old`, regardless of rawness. Interface files need this:
/// `ibtool` generates object-ID comments that would otherwise clobber
/// hand-written ones.
///
/// Translated values are sticky: a non-raw old value wins outright even
/// when it differs from the new one only in whitespace or quoting. The
/// result is a pure function of the two inputs and the flag.
pub fn merge(old: &Table, new: &Table, keep_comment: bool) -> Table {
    let mut merged = Table::new();
    for (key, new_string) in new {
        let mut record = new_string.clone();
        if let Some(old_string) = old.get(key) {
            if !old_string.is_raw() {
                record.value = old_string.value.clone();
            }
            if keep_comment {
                record.comment = old_string.comment.clone();
            }
        }
        merged.insert(key.clone(), record);
    }
    merged
}
