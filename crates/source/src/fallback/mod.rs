//! The synthetic code-fallback layer.
//!
//! The fallback layer sits below root in every view. It names every code of the
//! enumerable code spaces after itself, so a territory without a translated
//! name still displays as `GB` rather than as nothing.

use std::sync::Arc;

use stratum_locale::id::ROOT_ID;
use stratum_path::rewrite::with_alt;
use stratum_path::{NameType, PathKey};
use tracing::debug;

use crate::{CodeLists, DataLayer, Result};


/// Language display names present regardless of the configured code list.
const EXTRA_LANGUAGES: &[&str] = &[
	"ar_001", "de_AT", "de_CH", "en_AU", "en_CA", "en_GB", "en_US", "es_419", "es_ES", "es_MX", "fa_AF", "fr_CA", "fr_CH", "frc", "hi_Latn",
	"lou", "nds_NL", "nl_BE", "pt_BR", "pt_PT", "ro_MD", "sw_CD", "zh_Hans", "zh_Hant",
];

/// `(kind, code, value, alt)` entries for alternate display names.
const ALT_NAMES: &[(NameType, &str, &str, &str)] = &[
	(NameType::Language, "en_GB", "en_GB", "short"),
	(NameType::Language, "en_US", "en_US", "short"),
	(NameType::Language, "az", "az", "short"),
	(NameType::Language, "ckb", "ckb", "menu"),
	(NameType::Language, "ckb", "ckb", "variant"),
	(NameType::Language, "hi_Latn", "hi_Latn", "variant"),
	(NameType::Language, "yue", "yue", "menu"),
	(NameType::Language, "zh", "zh", "menu"),
	(NameType::Language, "zh_Hans", "zh", "long"),
	(NameType::Language, "zh_Hant", "zh", "long"),
	(NameType::Script, "Hans", "Hans", "stand-alone"),
	(NameType::Script, "Hant", "Hant", "stand-alone"),
	(NameType::Territory, "GB", "GB", "short"),
	(NameType::Territory, "HK", "HK", "short"),
	(NameType::Territory, "MO", "MO", "short"),
	(NameType::Territory, "PS", "PS", "short"),
	(NameType::Territory, "US", "US", "short"),
	(NameType::Territory, "CD", "CD", "variant"),
	(NameType::Territory, "CG", "CG", "variant"),
	(NameType::Territory, "CI", "CI", "variant"),
	(NameType::Territory, "CZ", "CZ", "variant"),
	(NameType::Territory, "FK", "FK", "variant"),
	(NameType::Territory, "TL", "TL", "variant"),
	(NameType::Territory, "SZ", "SZ", "variant"),
	(NameType::Territory, "IO", "IO", "biot"),
	(NameType::Territory, "IO", "IO", "chagos"),
	(NameType::Territory, "NZ", "NZ", "variant"),
	(NameType::Territory, "TR", "TR", "variant"),
];

/// Territories always present without an alt.
const EXTRA_TERRITORIES: &[&str] = &["XA", "XB"];

const GREGORIAN_ERAS: &str = "//ldml/dates/calendars/calendar[@type=\"gregorian\"]/eras";
const ERA_WIDTHS: &[&str] = &["eraAbbr", "eraNames", "eraNarrow"];
const ERAS: &[(&str, &str)] = &[("0", "BCE"), ("1", "CE")];

const KEY_DISPLAY_NAMES: &[&str] = &["calendar", "cf", "collation", "currency", "hc", "lb", "ms", "numbers"];

/// `(type, key)` pairs named after their type.
const TYPE_DISPLAY_NAMES: &[(&str, &str)] = &[
	("account", "cf"),
	("ahom", "numbers"),
	("arab", "numbers"),
	("arabext", "numbers"),
	("armn", "numbers"),
	("armnlow", "numbers"),
	("bali", "numbers"),
	("beng", "numbers"),
	("big5han", "collation"),
	("brah", "numbers"),
	("buddhist", "calendar"),
	("cakm", "numbers"),
	("cham", "numbers"),
	("chinese", "calendar"),
	("compat", "collation"),
	("coptic", "calendar"),
	("cyrl", "numbers"),
	("dangi", "calendar"),
	("deva", "numbers"),
	("diak", "numbers"),
	("dictionary", "collation"),
	("ducet", "collation"),
	("emoji", "collation"),
	("eor", "collation"),
	("ethi", "numbers"),
	("ethiopic", "calendar"),
	("ethiopic-amete-alem", "calendar"),
	("fullwide", "numbers"),
	("gb2312han", "collation"),
	("geor", "numbers"),
	("gong", "numbers"),
	("gonm", "numbers"),
	("gregorian", "calendar"),
	("grek", "numbers"),
	("greklow", "numbers"),
	("gujr", "numbers"),
	("guru", "numbers"),
	("h11", "hc"),
	("h12", "hc"),
	("h23", "hc"),
	("h24", "hc"),
	("hanidec", "numbers"),
	("hans", "numbers"),
	("hansfin", "numbers"),
	("hant", "numbers"),
	("hantfin", "numbers"),
	("hebr", "numbers"),
	("hebrew", "calendar"),
	("hmng", "numbers"),
	("hmnp", "numbers"),
	("indian", "calendar"),
	("islamic", "calendar"),
	("islamic-civil", "calendar"),
	("islamic-rgsa", "calendar"),
	("islamic-tbla", "calendar"),
	("islamic-umalqura", "calendar"),
	("iso8601", "calendar"),
	("japanese", "calendar"),
	("java", "numbers"),
	("jpan", "numbers"),
	("jpanfin", "numbers"),
	("kali", "numbers"),
	("kawi", "numbers"),
	("khmr", "numbers"),
	("knda", "numbers"),
	("lana", "numbers"),
	("lanatham", "numbers"),
	("laoo", "numbers"),
	("latn", "numbers"),
	("lepc", "numbers"),
	("limb", "numbers"),
	("loose", "lb"),
	("mathbold", "numbers"),
	("mathdbl", "numbers"),
	("mathmono", "numbers"),
	("mathsanb", "numbers"),
	("mathsans", "numbers"),
	("metric", "ms"),
	("mlym", "numbers"),
	("modi", "numbers"),
	("mong", "numbers"),
	("mroo", "numbers"),
	("mtei", "numbers"),
	("mymr", "numbers"),
	("mymrshan", "numbers"),
	("mymrtlng", "numbers"),
	("nagm", "numbers"),
	("nkoo", "numbers"),
	("normal", "lb"),
	("olck", "numbers"),
	("orya", "numbers"),
	("osma", "numbers"),
	("persian", "calendar"),
	("phonebook", "collation"),
	("pinyin", "collation"),
	("reformed", "collation"),
	("roc", "calendar"),
	("rohg", "numbers"),
	("roman", "numbers"),
	("romanlow", "numbers"),
	("saur", "numbers"),
	("search", "collation"),
	("searchjl", "collation"),
	("shrd", "numbers"),
	("sind", "numbers"),
	("sinh", "numbers"),
	("sora", "numbers"),
	("standard", "cf"),
	("standard", "collation"),
	("strict", "lb"),
	("stroke", "collation"),
	("sund", "numbers"),
	("takr", "numbers"),
	("talu", "numbers"),
	("taml", "numbers"),
	("tamldec", "numbers"),
	("tnsa", "numbers"),
	("telu", "numbers"),
	("thai", "numbers"),
	("tibt", "numbers"),
	("tirh", "numbers"),
	("traditional", "collation"),
	("unihan", "collation"),
	("uksystem", "ms"),
	("ussystem", "ms"),
	("vaii", "numbers"),
	("wara", "numbers"),
	("wcho", "numbers"),
	("zhuyin", "collation"),
];

/// Builds the frozen code-fallback layer.
///
/// The builder is an ordinary value, so independent data snapshots each get
/// their own layer.
#[derive(Debug, Clone, Default)]
pub struct FallbackBuilder {
	codes: CodeLists,
}

impl FallbackBuilder {
	pub fn new(codes: CodeLists) -> Self {
		Self { codes }
	}

	pub fn build(&self) -> Result<Arc<DataLayer>> {
		let layer = DataLayer::code_fallback();
		let put = |path: PathKey, value: &str| layer.set_value(path, value);

		let code_spaces: [(NameType, &[String]); 6] = [
			(NameType::Language, &self.codes.languages),
			(NameType::Script, &self.codes.scripts),
			(NameType::Territory, &self.codes.territories),
			(NameType::Variant, &self.codes.variants),
			(NameType::CurrencyName, &self.codes.currencies),
			(NameType::CurrencySymbol, &self.codes.currencies),
		];
		for (kind, codes) in code_spaces {
			for code in codes {
				if kind == NameType::Language && code == ROOT_ID {
					continue;
				}
				put(kind.key_path(code)?, code.as_str())?;
			}
		}
		for zone in &self.codes.zones {
			put(NameType::ExemplarCity.key_path(zone)?, exemplar_city(zone).as_str())?;
		}

		for &code in EXTRA_LANGUAGES {
			put(NameType::Language.key_path(code)?, code)?;
		}
		for &code in EXTRA_TERRITORIES {
			put(NameType::Territory.key_path(code)?, code)?;
		}
		for &(kind, code, value, alt) in ALT_NAMES {
			put(with_alt(&kind.key_path(code)?, alt)?, value)?;
		}
		for &width in ERA_WIDTHS {
			for &(era, value) in ERAS {
				let path = PathKey::parse(&format!("{GREGORIAN_ERAS}/{width}/era[@type=\"{era}\"]"))?;
				put(with_alt(&path, "variant")?, value)?;
			}
		}
		for &name in KEY_DISPLAY_NAMES {
			put(PathKey::parse(&format!("//ldml/localeDisplayNames/keys/key[@type=\"{name}\"]"))?, name)?;
		}
		for &(kind, key) in TYPE_DISPLAY_NAMES {
			let path = PathKey::parse(&format!("//ldml/localeDisplayNames/types/type[@key=\"{key}\"][@type=\"{kind}\"]"))?;
			put(path, kind)?;
		}

		layer.freeze();
		debug!(paths = layer.len(), "built code-fallback layer");
		Ok(Arc::new(layer))
	}
}

/// Exemplar city derived from a zone id: the last segment with `_` as space.
pub fn exemplar_city(zone: &str) -> String {
	zone.rsplit('/').next().unwrap_or(zone).replace('_', " ")
}
