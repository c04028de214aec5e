//! Primitive type keywords and the conversion keywords that target them.
//!
//! Visual Basic spells its built-in types as keywords (`Integer`, `String`, ...) and has one
//! conversion keyword per primitive (`CInt`, `CStr`, ...). The parser uses these tables to build
//! keyword type references and to resolve the target type of a primitive conversion.
//!
//! ## Examples
//! ```rust
//! use vbsyn_core::lang::keywords::KeywordId;
//! use vbsyn_core::lang::types;
//!
//! assert_eq!(types::conversion_target(KeywordId::CInt), Some(KeywordId::Integer));
//! assert_eq!(types::runtime_name(KeywordId::Integer), Some("System.Int32"));
//! ```

use super::keywords::KeywordId;

/// A primitive type keyword and the runtime type it names.
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveTypeInfo {
    pub keyword: KeywordId,
    pub runtime_name: &'static str,
}

/// A conversion keyword and the primitive type keyword it converts to.
#[derive(Debug, Clone, Copy)]
pub struct ConversionInfo {
    pub keyword: KeywordId,
    pub target: KeywordId,
}

/// All primitive type keywords.
pub const PRIMITIVE_TYPES: &[PrimitiveTypeInfo] = &[
    prim(KeywordId::Boolean, "System.Boolean"),
    prim(KeywordId::Byte, "System.Byte"),
    prim(KeywordId::Char, "System.Char"),
    prim(KeywordId::Date, "System.DateTime"),
    prim(KeywordId::Decimal, "System.Decimal"),
    prim(KeywordId::Double, "System.Double"),
    prim(KeywordId::Integer, "System.Int32"),
    prim(KeywordId::Long, "System.Int64"),
    prim(KeywordId::Object, "System.Object"),
    prim(KeywordId::SByte, "System.SByte"),
    prim(KeywordId::Short, "System.Int16"),
    prim(KeywordId::Single, "System.Single"),
    prim(KeywordId::String, "System.String"),
    prim(KeywordId::UInteger, "System.UInt32"),
    prim(KeywordId::ULong, "System.UInt64"),
    prim(KeywordId::UShort, "System.UInt16"),
];

/// All primitive conversion keywords.
pub const PRIMITIVE_CONVERSIONS: &[ConversionInfo] = &[
    conv(KeywordId::CBool, KeywordId::Boolean),
    conv(KeywordId::CByte, KeywordId::Byte),
    conv(KeywordId::CChar, KeywordId::Char),
    conv(KeywordId::CDate, KeywordId::Date),
    conv(KeywordId::CDec, KeywordId::Decimal),
    conv(KeywordId::CDbl, KeywordId::Double),
    conv(KeywordId::CInt, KeywordId::Integer),
    conv(KeywordId::CLng, KeywordId::Long),
    conv(KeywordId::CObj, KeywordId::Object),
    conv(KeywordId::CSByte, KeywordId::SByte),
    conv(KeywordId::CShort, KeywordId::Short),
    conv(KeywordId::CSng, KeywordId::Single),
    conv(KeywordId::CStr, KeywordId::String),
    conv(KeywordId::CUInt, KeywordId::UInteger),
    conv(KeywordId::CULng, KeywordId::ULong),
    conv(KeywordId::CUShort, KeywordId::UShort),
];

/// Return `true` if `id` names a primitive type.
pub fn is_primitive(id: KeywordId) -> bool {
    PRIMITIVE_TYPES.iter().any(|p| p.keyword == id)
}

/// Return the runtime type name for a primitive type keyword.
pub fn runtime_name(id: KeywordId) -> Option<&'static str> {
    PRIMITIVE_TYPES.iter().find(|p| p.keyword == id).map(|p| p.runtime_name)
}

/// Return the primitive type keyword a conversion keyword converts to.
pub fn conversion_target(id: KeywordId) -> Option<KeywordId> {
    PRIMITIVE_CONVERSIONS.iter().find(|c| c.keyword == id).map(|c| c.target)
}

const fn prim(keyword: KeywordId, runtime_name: &'static str) -> PrimitiveTypeInfo {
    PrimitiveTypeInfo { keyword, runtime_name }
}

const fn conv(keyword: KeywordId, target: KeywordId) -> ConversionInfo {
    ConversionInfo { keyword, target }
}
