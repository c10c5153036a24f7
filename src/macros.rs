/// Builds a [`Table`](crate::Table) from literal rows.
///
/// Every field expression is converted with `String::from`, so `&str` and
/// `String` values can be mixed.
///
/// ```rust
/// use dsv_table::table;
///
/// let table = table![["a", "b"], ["c"]];
/// assert_eq!(table.len(), 2);
/// assert_eq!(table[1][0], "c");
/// ```
#[macro_export]
macro_rules! table {
    // Handle empty table
    () => {
        $crate::Table::new()
    };

    // Handle rows of fields
    ($([ $($field:expr),* $(,)? ]),+ $(,)?) => {
        $crate::Table::from(::std::vec![
            $(<$crate::Record>::from([$(::std::string::String::from($field)),*])),+
        ])
    };
}
