//! PHP and Blade syntax
//!
//! Every piece of target-language syntax the inference produces goes through
//! these helpers, so the decision logic elsewhere in the crate never spells
//! out quoting or member access itself.

/// Single-quoted PHP string literal
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if matches!(c, '\\' | '\'') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

/// `$name`
pub fn variable(name: &str) -> String {
    format!("${}", name)
}

/// `receiver->name`
pub fn property(receiver: &str, name: &str) -> String {
    format!("{}->{}", receiver, name)
}

/// `receiver->name(args)`
pub fn method(receiver: &str, name: &str, args: &[String]) -> String {
    format!("{}->{}({})", receiver, name, args.join(", "))
}

/// `receiver?->name(args)`
pub fn nullsafe_method(receiver: &str, name: &str, args: &[String]) -> String {
    format!("{}?->{}({})", receiver, name, args.join(", "))
}

/// `function(args)`
pub fn call(function: &str, args: &[String]) -> String {
    format!("{}({})", function, args.join(", "))
}

/// `Class::name(args)`
pub fn static_call(class: &str, name: &str, args: &[String]) -> String {
    format!("{}::{}({})", class, name, args.join(", "))
}

/// `Class::class`
pub fn class_reference(class: &str) -> String {
    format!("{}::class", class)
}

/// `[a, b]`
pub fn array(items: &[String]) -> String {
    format!("[{}]", items.join(", "))
}

/// Array of quoted strings
pub fn string_array<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| quote(item.as_ref())).collect();
    array(&quoted)
}

/// `condition ? then : otherwise`
pub fn ternary(condition: &str, then: &str, otherwise: &str) -> String {
    format!("{} ? {} : {}", condition, then, otherwise)
}

/// `expression === null`
pub fn is_null(expression: &str) -> String {
    format!("{} === null", expression)
}

/// `expression !== null`
pub fn is_not_null(expression: &str) -> String {
    format!("{} !== null", expression)
}

/// `(expression)`
pub fn parenthesize(expression: &str) -> String {
    format!("({})", expression)
}

/// `a . b . c`
pub fn concat(parts: &[String]) -> String {
    parts.join(" . ")
}

/// `fn () => body`
pub fn arrow_fn(body: &str) -> String {
    format!("fn () => {}", body)
}

/// Faker call through the `fake()` helper, e.g. `fake()->email()`
pub fn faker(formatter_call: &str) -> String {
    format!("fake()->{}", formatter_call)
}

/// Faker call through the unique modifier
pub fn unique_faker(formatter_call: &str) -> String {
    format!("fake()->unique()->{}", formatter_call)
}

/// `fake()->boolean(percent) ? value : null`
pub fn sometimes_null(value: &str, percent: u8) -> String {
    ternary(&format!("fake()->boolean({})", percent), value, "null")
}

/// Escaped Blade echo: `{{ expression }}`
pub fn echo(expression: &str) -> String {
    format!("{{{{ {} }}}}", expression)
}

/// `@if (condition)body@endif`
pub fn blade_if(condition: &str, body: &str) -> String {
    format!("@if ({}){}@endif", condition, body)
}

/// `route('name', args)`
pub fn route(name: &str, args: &[String]) -> String {
    let mut all = vec![quote(name)];
    all.extend_from_slice(args);
    call("route", &all)
}

/// Escape text for HTML content and attribute values
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
