//! Listing sort keys, encoded on the wire as `<field>_<direction>`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Created,
    Edited,
    Completed,
}

impl SortField {
    /// Column the field sorts on (quoted, the schema uses camelCase names).
    pub fn column(self) -> &'static str {
        match self {
            SortField::Created => r#""createdAt""#,
            SortField::Edited => r#""editedAt""#,
            SortField::Completed => r#""completedAt""#,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    /// Parses a `<field>_<direction>` key. Unrecognized fields fall back to
    /// `created`, and anything other than the literal `asc` sorts descending.
    pub fn parse(raw: &str) -> Self {
        let (field, direction) = raw.split_once('_').unwrap_or((raw, ""));
        let field = match field {
            "edited" => SortField::Edited,
            "completed" => SortField::Completed,
            _ => SortField::Created,
        };
        let direction = if direction == "asc" {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        };
        Self { field, direction }
    }

    /// Whether rows with a NULL sort column are dropped from the listing.
    /// A note that was never edited does not appear when sorting by `edited`;
    /// every note has a creation time, so `created` filters nothing.
    pub fn filters_nulls(self) -> bool {
        !matches!(self.field, SortField::Created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field_and_direction() {
        let key = SortKey::parse("edited_asc");
        assert_eq!(key.field, SortField::Edited);
        assert_eq!(key.direction, SortDirection::Asc);

        let key = SortKey::parse("completed_desc");
        assert_eq!(key.field, SortField::Completed);
        assert_eq!(key.direction, SortDirection::Desc);
    }

    #[test]
    fn unknown_field_defaults_to_created() {
        assert_eq!(SortKey::parse("priority_asc").field, SortField::Created);
        assert_eq!(SortKey::parse("garbage").field, SortField::Created);
    }

    #[test]
    fn anything_but_asc_sorts_descending() {
        assert_eq!(SortKey::parse("created_asc").direction, SortDirection::Asc);
        assert_eq!(SortKey::parse("created_desc").direction, SortDirection::Desc);
        assert_eq!(SortKey::parse("created_ASC").direction, SortDirection::Desc);
        assert_eq!(SortKey::parse("created").direction, SortDirection::Desc);
    }

    #[test]
    fn null_filter_applies_to_edited_and_completed_only() {
        assert!(!SortKey::parse("created_desc").filters_nulls());
        assert!(SortKey::parse("edited_desc").filters_nulls());
        assert!(SortKey::parse("completed_asc").filters_nulls());
    }
}
