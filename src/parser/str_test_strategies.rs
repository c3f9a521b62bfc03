use proptest::prelude::*;


/// Writes an expression in `<count>DX[<critical>][±<modifier>][@<critical>]` form.
pub(crate) fn notation(
    count: u32,
    critical: Option<u32>,
    modifier: Option<(bool, u32)>,
    at: Option<u32>
) -> String {
    let mut expr = format!("{count}DX");

    if let Some(critical) = critical {
        expr.push_str(&critical.to_string());
    }

    if let Some((negative, value)) = modifier {
        expr.push(if negative { '-' } else { '+' });
        expr.push_str(&value.to_string());
    }

    if let Some(at) = at {
        expr.push('@');
        expr.push_str(&at.to_string());
    }

    expr
}

pub(crate) fn marker_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(&["DX", "dx", "Dx", "dX"][..])
}

/// Well formed expressions with an in-range count and critical values.
pub(crate) fn dx_expression_strategy() -> impl Strategy<Value = String> {
    (
        1u32..=100,
        marker_strategy(),
        prop::option::of(2u32..=10),
        prop::option::of((any::<bool>(), 0u32..=1000)),
        prop::option::of(2u32..=10)
    ).prop_map(|(count, marker, critical, modifier, at)| {
        notation(count, critical, modifier, at).replacen("DX", marker, 1)
    })
}

/// Strings that can never match the grammar.
pub(crate) fn malformed_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[ \\t]{1,4}",
        (1u32..=100).prop_map(|n| n.to_string()),
        (1u32..=100, 1u32..=100).prop_map(|(c, s)| format!("{c}d{s}")),
        (marker_strategy(), 1u32..=10).prop_map(|(m, k)| format!("{m}{k}")),
        "[a-zA-Z]{1,3}DX[0-9]{0,2}",
        (dx_expression_strategy(), "[#!?*/a-z][#!?*/a-z ]{0,2}").prop_map(|(e, g)| format!("{e}{g}")),
        (dx_expression_strategy(), "[#!?*/]{1,3}").prop_map(|(e, g)| format!("{g}{e}")),
        (1u32..=100, 1u32..=100).prop_map(|(c, m)| format!("{c}DX+{m}+")),
        (1u32..=100).prop_map(|c| format!("{c}DX@")),
        (1u32..=100, 2u32..=10).prop_map(|(c, k)| format!("{c} DX{k}")),
    ]
}
