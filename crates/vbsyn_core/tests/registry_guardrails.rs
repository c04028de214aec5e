use std::collections::HashMap;

use vbsyn_core::lang::keywords::{self, KeywordId};
use vbsyn_core::lang::operators::{self, OperatorId, PrecedenceTier};
use vbsyn_core::lang::punctuation;
use vbsyn_core::lang::types;

#[test]
fn keyword_table_is_ordered_by_id() {
    assert_eq!(keywords::KEYWORDS.len(), KeywordId::COUNT);
    for (i, info) in keywords::KEYWORDS.iter().enumerate() {
        assert_eq!(info.id.index(), i, "keyword {:?} is out of order", info.id);
    }
}

#[test]
fn keyword_spellings_unique_and_resolvable_in_any_case() {
    let mut seen: HashMap<String, KeywordId> = HashMap::new();

    for info in keywords::KEYWORDS {
        assert_eq!(keywords::from_str(info.canonical), Some(info.id));
        assert_eq!(keywords::from_str(&info.canonical.to_ascii_lowercase()), Some(info.id));
        assert_eq!(keywords::from_str(&info.canonical.to_ascii_uppercase()), Some(info.id));
        assert_eq!(keywords::as_str(info.id), info.canonical);

        if let Some(prev) = seen.insert(info.canonical.to_ascii_lowercase(), info.id) {
            panic!("duplicate keyword spelling {:?}: {:?} and {:?}", info.canonical, prev, info.id);
        }
    }
}

#[test]
fn contextual_keywords_follow_reserved_ones() {
    let first_contextual = keywords::KEYWORDS
        .iter()
        .position(|k| k.contextual)
        .expect("registry has contextual keywords");
    assert!(keywords::KEYWORDS[first_contextual..].iter().all(|k| k.contextual));
    assert!(keywords::is_contextual(KeywordId::From));
    assert!(!keywords::is_contextual(KeywordId::Dim));
}

#[test]
fn operator_table_is_ordered_by_id() {
    assert_eq!(operators::OPERATORS.len(), OperatorId::COUNT);
    for (i, info) in operators::OPERATORS.iter().enumerate() {
        assert_eq!(info.id.index(), i, "operator {:?} is out of order", info.id);
    }
}

#[test]
fn symbol_operators_resolve_and_word_operators_map_to_keywords() {
    for info in operators::OPERATORS {
        match info.keyword {
            None => assert_eq!(operators::from_str(info.spelling), Some(info.id)),
            Some(kw) => {
                assert_eq!(operators::for_keyword(kw), Some(info.id));
                assert_eq!(keywords::as_str(kw), info.spelling);
            }
        }
    }
}

#[test]
fn precedence_tiers_match_the_language() {
    let tier = |id| operators::info_for(id).tier;
    assert_eq!(tier(OperatorId::OrElse), Some(PrecedenceTier::LogicalOr));
    assert_eq!(tier(OperatorId::AndAlso), Some(PrecedenceTier::LogicalAnd));
    assert_eq!(tier(OperatorId::Like), Some(PrecedenceTier::Relational));
    assert_eq!(tier(OperatorId::Ampersand), Some(PrecedenceTier::Concatenation));
    assert_eq!(tier(OperatorId::Mod), Some(PrecedenceTier::Modulo));
    assert_eq!(tier(OperatorId::Caret), Some(PrecedenceTier::Exponentiation));
    assert_eq!(tier(OperatorId::ColonEq), None);

    assert!(PrecedenceTier::Concatenation < PrecedenceTier::Additive);
    assert!(PrecedenceTier::Modulo < PrecedenceTier::IntegerDivision);
    assert!(PrecedenceTier::IntegerDivision < PrecedenceTier::Multiplicative);
    assert!(PrecedenceTier::Multiplicative < PrecedenceTier::Unary);
}

#[test]
fn compound_assignments_have_a_base_operator() {
    for info in operators::OPERATORS {
        if info.spelling.ends_with('=') && info.spelling.len() > 1 && info.tier.is_none() && info.id != OperatorId::ColonEq
        {
            let base = operators::compound_base(info.id).expect("compound operator has a base");
            assert_eq!(format!("{}=", operators::as_str(base)), info.spelling);
        }
    }
}

#[test]
fn punctuation_table_is_ordered_and_resolvable() {
    for (i, info) in punctuation::PUNCTUATION.iter().enumerate() {
        assert_eq!(info.id.index(), i);
        assert_eq!(punctuation::from_str(info.canonical), Some(info.id));
    }
}

#[test]
fn every_primitive_conversion_targets_a_primitive_type() {
    for conv in types::PRIMITIVE_CONVERSIONS {
        assert!(types::is_primitive(conv.target), "{:?} targets a non-primitive", conv.keyword);
        assert_eq!(keywords::category(conv.keyword), keywords::KeywordCategory::Conversion);
    }
    for prim in types::PRIMITIVE_TYPES {
        assert_eq!(keywords::category(prim.keyword), keywords::KeywordCategory::Type);
    }
}
