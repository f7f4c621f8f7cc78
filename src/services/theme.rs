//! Theme token file generation.
//!
//! `init` writes a TypeScript module holding the default CSS-variable map so
//! consumer components and the installed patterns share one token source.

pub const DEFAULT_THEME_TOKENS: &[(&str, &str)] = &[
    ("--background", "0 0% 100%"),
    ("--foreground", "240 10% 3.9%"),
    ("--muted", "240 4.8% 95.9%"),
    ("--muted-foreground", "240 3.8% 46.1%"),
    ("--border", "240 5.9% 90%"),
    ("--primary", "240 5.9% 10%"),
    ("--primary-foreground", "0 0% 98%"),
    ("--destructive", "0 84.2% 60.2%"),
    ("--success", "142 76% 36%"),
    ("--warning", "38 92% 50%"),
    ("--radius", "0.5rem"),
];

pub fn render_theme_config() -> String {
    let mut out = String::from(
        "// Generated by patkit init. Edit values freely; patkit never rewrites\n\
         // this file unless invoked with --force.\n\
         export const theme = {\n",
    );
    for (key, value) in DEFAULT_THEME_TOKENS {
        out.push_str(&format!("  \"{}\": \"{}\",\n", key, value));
    }
    out.push_str("} as const;\n\nexport type ThemeToken = keyof typeof theme;\n");
    out
}
