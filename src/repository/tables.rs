//! Static descriptors for the per-position statistic tables and the
//! sort columns the ranking endpoints accept. Every piece of SQL that
//! names a table or an ORDER BY column is assembled from these
//! compile-time constants, never from request input.

/// Marker written into `yan_pozisyon` for tables that have no such
/// column (goalkeepers have no secondary position).
pub const NOT_APPLICABLE: &str = "YOK";

#[derive(Debug)]
pub struct PositionTable {
    /// URL segment for the category endpoints.
    pub slug: &'static str,
    /// SQL table name.
    pub table: &'static str,
    /// Display label used in user-facing messages.
    pub label: &'static str,
    pub has_yan_pozisyon: bool,
}

/// Probe order of the fallback resolver. The order is load-bearing:
/// when a player id shows up in more than one table, the earliest
/// table here wins, deterministically.
pub const POSITION_TABLES: &[PositionTable] = &[
    PositionTable {
        slug: "kaleci",
        table: "kaleci",
        label: "kaleci",
        has_yan_pozisyon: false,
    },
    PositionTable {
        slug: "bek",
        table: "bek",
        label: "bek",
        has_yan_pozisyon: true,
    },
    PositionTable {
        slug: "stoper",
        table: "stoper",
        label: "stoper",
        has_yan_pozisyon: true,
    },
    PositionTable {
        slug: "on-libero",
        table: "on_libero",
        label: "ön libero",
        has_yan_pozisyon: true,
    },
    PositionTable {
        slug: "kanat",
        table: "kanat",
        label: "kanat",
        has_yan_pozisyon: true,
    },
    PositionTable {
        slug: "orta-saha",
        table: "orta_saha",
        label: "orta saha",
        has_yan_pozisyon: true,
    },
    PositionTable {
        slug: "ofansif-orta-saha",
        table: "ofansif_orta_saha",
        label: "ofansif orta saha",
        has_yan_pozisyon: true,
    },
    PositionTable {
        slug: "acik-kanat",
        table: "acik_kanat",
        label: "açık kanat",
        has_yan_pozisyon: true,
    },
    PositionTable {
        slug: "santrafor",
        table: "santrafor",
        label: "santrafor",
        has_yan_pozisyon: true,
    },
];

pub fn find_category(slug: &str) -> Option<&'static PositionTable> {
    POSITION_TABLES.iter().find(|pt| pt.slug == slug)
}

/// Tables the plain listing endpoint may read. The fact table is
/// listable alongside the nine position tables.
pub fn listing_table(slug: &str) -> Option<&'static str> {
    if slug == "goal-assist" {
        return Some("goal_assist");
    }
    find_category(slug).map(|pt| pt.table)
}

#[derive(Debug)]
pub struct SortKey {
    pub param: &'static str,
    pub column: &'static str,
    pub descending: bool,
}

/// Allow-list for the `sortBy` parameter. Rank columns sort ascending
/// (1 is best), score columns descending. The first entry is the
/// default.
pub const SORT_KEYS: &[SortKey] = &[
    SortKey {
        param: "genel_sira",
        column: "genel_sira",
        descending: false,
    },
    SortKey {
        param: "performans_skoru",
        column: "performans_skoru",
        descending: true,
    },
    SortKey {
        param: "kalite_sira_katsayisi",
        column: "kalite_sira_katsayisi",
        descending: true,
    },
    SortKey {
        param: "performans_skor_sirasi",
        column: "performans_skor_sirasi",
        descending: false,
    },
    SortKey {
        param: "surdurulebilirlik_sira",
        column: "surdurulebilirlik_sira",
        descending: false,
    },
];

/// Resolves `sortBy` against the allow-list. Anything unknown (or
/// absent) falls back to the default key, silently.
pub fn sort_key(param: Option<&str>) -> &'static SortKey {
    param
        .and_then(|p| SORT_KEYS.iter().find(|k| k.param == p))
        .unwrap_or(&SORT_KEYS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_order_is_fixed() {
        let order: Vec<&str> = POSITION_TABLES.iter().map(|pt| pt.table).collect();
        assert_eq!(
            order,
            vec![
                "kaleci",
                "bek",
                "stoper",
                "on_libero",
                "kanat",
                "orta_saha",
                "ofansif_orta_saha",
                "acik_kanat",
                "santrafor",
            ]
        );
    }

    #[test]
    fn only_goalkeepers_lack_yan_pozisyon() {
        for pt in POSITION_TABLES {
            assert_eq!(pt.has_yan_pozisyon, pt.table != "kaleci", "{}", pt.table);
        }
    }

    #[test]
    fn unknown_sort_param_falls_back_to_default() {
        let default = sort_key(None);
        assert_eq!(default.column, "genel_sira");
        assert!(!default.descending);

        let coerced = sort_key(Some("oyuncu_isim; DROP TABLE kadro"));
        assert_eq!(coerced.column, default.column);
        assert_eq!(coerced.descending, default.descending);
    }

    #[test]
    fn known_sort_params_resolve() {
        let key = sort_key(Some("performans_skoru"));
        assert_eq!(key.column, "performans_skoru");
        assert!(key.descending);
    }

    #[test]
    fn listing_covers_positions_and_fact_table() {
        assert_eq!(listing_table("goal-assist"), Some("goal_assist"));
        assert_eq!(listing_table("on-libero"), Some("on_libero"));
        assert_eq!(listing_table("transferler"), None);
    }
}
