use sea_orm::ColumnTrait;
use sea_orm::sea_query::{BinOper, Expr, ExprTrait, Func, SimpleExpr};

/// 转义 LIKE 模式中的通配符，转义字符为 `\`
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `LOWER(col) LIKE LOWER('%term%') ESCAPE '\'`，两侧在数据库内用同一规则折叠大小写
pub fn lower_contains<C: ColumnTrait>(column: C, term: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like_pattern(term));
    let right = Expr::Binary(
        Box::new(Func::lower(Expr::val(pattern)).into()),
        BinOper::Escape,
        Box::new(Expr::Constant('\\'.into())),
    );
    Expr::expr(Func::lower(Expr::col(column.as_column_ref()))).binary(BinOper::Like, right)
}

/// `LOWER(col) = LOWER(value)`，写入前该列已去除首尾空白
pub fn lower_eq<C: ColumnTrait>(column: C, value: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column.as_column_ref())))
        .eq(Func::lower(Expr::val(value.trim().to_string())))
}

/// 搜索词去除首尾空白，空串视为未提供
pub fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("plain"), "plain");
        assert_eq!(escape_like_pattern("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like_pattern("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_normalize_search() {
        assert_eq!(normalize_search(Some("  civil ")), Some("civil".to_string()));
        assert_eq!(normalize_search(Some("   ")), None);
        assert_eq!(normalize_search(None), None);
    }
}
