/// Pack `names` into space-separated lines no wider than `width` characters.
///
/// Greedy: a name goes on the current line if it fits, otherwise it starts a
/// new one. Names are never split; a single name wider than `width` gets a
/// line of its own.
pub fn wrap_names<'a, I>(names: I, width: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for name in names {
        let name_len = name.chars().count();
        if line_len > 0 && line_len + 1 + name_len > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.push_str(name);
        line_len += name_len;
    }

    if line_len > 0 {
        lines.push(line);
    }
    lines
}
