//! The pre-compilation validation pass

use std::fmt::{Debug, Display};

/// Pre-compilation validation of tables.
///
/// Some requirements of the format are awkward to encode in the type system,
/// such as a glyph's byte length depending on the font's pixel dimensions.
/// These requirements are enforced via a validation pass, which runs before
/// any bytes are written.
pub trait Validate {
    /// Ensure that this table is well-formed, reporting any errors.
    ///
    /// This calls [validate_impl][Self::validate_impl] and collects any errors.
    fn validate(&self) -> Result<(), ValidationReport> {
        let mut ctx = Default::default();
        self.validate_impl(&mut ctx);
        if ctx.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationReport { errors: ctx.errors })
        }
    }

    /// Validate this table.
    ///
    /// If you need to implement this directly, it should look something like:
    ///
    /// ```rust
    /// # use write_psf::validate::{Validate, ValidationCtx};
    /// struct MyRecord {
    ///     my_values: Vec<u16>,
    /// }
    ///
    /// impl Validate for MyRecord {
    ///     fn validate_impl(&self, ctx: &mut ValidationCtx) {
    ///         ctx.in_table("MyRecord", |ctx| {
    ///             ctx.in_field("my_values", |ctx| {
    ///                 if self.my_values.contains(&0xFFFF) {
    ///                     ctx.report("0xFFFF is reserved");
    ///                 }
    ///             })
    ///         })
    ///     }
    /// }
    /// ```
    fn validate_impl(&self, ctx: &mut ValidationCtx);
}

/// A context for collecting validation errors.
///
/// This is responsible for tracking the position in the tree at which
/// a given error is reported.
///
/// ## paths/locations
///
/// As validation travels down through the font, the path is recorded
/// via appropriate calls to methods like [in_table][Self::in_table] and
/// [in_field][Self::in_field].
#[derive(Clone, Debug, Default)]
pub struct ValidationCtx {
    cur_location: Vec<LocationElem>,
    errors: Vec<ValidationError>,
}

#[derive(Debug, Clone)]
struct ValidationError {
    error: String,
    location: Vec<LocationElem>,
}

/// One or more validation errors.
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

#[derive(Debug, Clone)]
enum LocationElem {
    Table(&'static str),
    Field(&'static str),
    Index(usize),
}

impl ValidationCtx {
    /// Run the provided closure in the context of a new table.
    ///
    /// Errors reported in the closure will include the provided identifer
    /// in their path.
    pub fn in_table(&mut self, name: &'static str, f: impl FnOnce(&mut ValidationCtx)) {
        self.with_elem(LocationElem::Table(name), f);
    }

    /// Run the provided closure in the context of a new field.
    ///
    /// Errors reported in the closure will be associated with the field.
    pub fn in_field(&mut self, name: &'static str, f: impl FnOnce(&mut ValidationCtx)) {
        self.with_elem(LocationElem::Field(name), f);
    }

    /// Run the provided closure in the context of an array.
    pub fn in_array(&mut self, f: impl FnOnce(&mut ValidationCtx)) {
        self.with_elem(LocationElem::Index(0), f);
    }

    /// Run the provided closure in the context of a new array item.
    ///
    /// This must only be called in a closure passed to [in_array][Self::in_array].
    pub fn array_item(&mut self, f: impl FnOnce(&mut ValidationCtx)) {
        debug_assert!(matches!(
            self.cur_location.last(),
            Some(LocationElem::Index(_))
        ));
        f(self);
        if let Some(LocationElem::Index(i)) = self.cur_location.last_mut() {
            *i += 1;
        }
    }

    /// Report a new error, associating it with the current path.
    pub fn report(&mut self, msg: impl Display) {
        self.errors.push(ValidationError {
            location: self.cur_location.clone(),
            error: msg.to_string(),
        });
    }

    fn with_elem(&mut self, elem: LocationElem, f: impl FnOnce(&mut ValidationCtx)) {
        self.cur_location.push(elem);
        f(self);
        self.cur_location.pop();
    }
}

impl ValidationReport {
    /// The number of errors in this report.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Each error message, paired with the path at which it was reported.
    ///
    /// Paths look like `UnicodeTable.entries[3].sequences`.
    pub fn iter(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        self.errors
            .iter()
            .map(|error| (error.path(), error.error.as_str()))
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let [error] = self.errors.as_slice() {
            return writeln!(f, "Validation error:\n{error}");
        }

        writeln!(f, "{} validation errors:", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "#{}\n{error}", i + 1)?;
        }
        Ok(())
    }
}

impl Debug for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl ValidationError {
    fn path(&self) -> String {
        let mut path = String::new();
        for elem in &self.location {
            match elem {
                LocationElem::Table(name) if path.is_empty() => path.push_str(name),
                LocationElem::Table(name) | LocationElem::Field(name) => {
                    path.push('.');
                    path.push_str(name);
                }
                LocationElem::Index(idx) => path.push_str(&format!("[{idx}]")),
            }
        }
        path
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\"{}\"", self.error)?;
        writeln!(f, "in: {}", self.path())
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        self.as_slice().validate_impl(ctx)
    }
}

impl<T: Validate> Validate for [T] {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_array(|ctx| {
            for item in self.iter() {
                ctx.array_item(|ctx| {
                    item.validate_impl(ctx);
                })
            }
        });
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        if let Some(t) = self {
            t.validate_impl(ctx)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Record {
        values: Vec<u16>,
    }

    struct Item(u16);

    impl Validate for Item {
        fn validate_impl(&self, ctx: &mut ValidationCtx) {
            if self.0 == 0 {
                ctx.report("zero is not allowed");
            }
        }
    }

    impl Validate for Record {
        fn validate_impl(&self, ctx: &mut ValidationCtx) {
            ctx.in_table("Record", |ctx| {
                ctx.in_field("values", |ctx| {
                    let items: Vec<_> = self.values.iter().copied().map(Item).collect();
                    items.validate_impl(ctx);
                })
            })
        }
    }

    #[test]
    fn ok_when_nothing_reported() {
        let record = Record {
            values: vec![1, 2, 3],
        };
        assert!(record.validate().is_ok());
    }

    #[test]
    fn paths_include_array_index() {
        let record = Record {
            values: vec![1, 0, 2, 0],
        };
        let report = record.validate().unwrap_err();
        assert_eq!(report.len(), 2);
        let paths: Vec<_> = report.iter().map(|(path, _)| path).collect();
        assert_eq!(paths, ["Record.values[1]", "Record.values[3]"]);
        let printed = report.to_string();
        assert!(printed.starts_with("2 validation errors:"), "{printed}");
        assert!(printed.contains("\"zero is not allowed\""));
    }
}
