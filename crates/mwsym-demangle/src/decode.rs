//! The recursive type decoder.
//!
//! A type expression is either a numeric production (a literal constant or
//! a length-prefixed identifier) or a chain of single-letter codes that
//! stack modifiers around a terminal base. Every loop here consumes at
//! least one character per iteration or gives up, so total work is bounded
//! by the input length even for garbage input.

use crate::component::Component;
use crate::cursor::Cursor;
use crate::render::render_components;

/// Cap on nested productions (templates, qualified names, function types,
/// length-prefixed re-entry). On hitting it the decoder exhausts the
/// cursor, which unwinds every in-flight loop and leaves the partial text
/// assembled so far.
const MAX_DEPTH: usize = 64;

/// Decodes one type production from the cursor, appending rendered text to
/// `output`. Never fails; malformed input yields partial text.
pub(crate) fn demangle_type(input: &mut Cursor, output: &mut String, depth: usize) {
    if depth > MAX_DEPTH {
        log::trace!("type nesting limit hit at position {}", input.position());
        input.exhaust();
        return;
    }

    let c = input.peek();
    if c == '-' || c.is_ascii_digit() {
        demangle_number(input, output, depth);
        return;
    }

    let mut components: Vec<Component> = Vec::new();

    loop {
        let c = input.read();
        match c {
            'C' => components.insert(0, Component::Const),
            'P' => components.insert(0, Component::Pointer),
            'R' => components.insert(0, Component::Reference),
            'U' => components.insert(0, Component::Unsigned),

            'A' => {
                let mut dimension: u64 = 0;
                loop {
                    let d = input.read();
                    if d == '_' || d == Cursor::SENTINEL {
                        break;
                    }
                    if let Some(v) = d.to_digit(10) {
                        dimension = dimension.saturating_mul(10).saturating_add(u64::from(v));
                    }
                }
                components.insert(0, Component::Array(dimension));
            }

            'v' => {
                components.insert(0, Component::Void);
                break;
            }
            'i' => {
                components.insert(0, Component::Int);
                break;
            }
            'f' => {
                components.insert(0, Component::Float);
                break;
            }
            'd' => {
                components.insert(0, Component::Double);
                break;
            }

            'Q' => {
                let count = input.read().to_digit(10).unwrap_or(0);
                let mut name = String::new();
                for part in 0..count {
                    if part > 0 {
                        name.push_str("::");
                    }
                    demangle_type(input, &mut name, depth + 1);
                }
                components.insert(0, Component::Type(name));
                break;
            }

            'F' => {
                let mut params = String::new();
                while input.peek() != '_' && input.peek() != Cursor::SENTINEL {
                    if !params.is_empty() {
                        params.push_str(", ");
                    }
                    demangle_type(input, &mut params, depth + 1);
                }
                input.read();

                let mut ret = String::new();
                demangle_type(input, &mut ret, depth + 1);

                if params == "void" {
                    params.clear();
                }
                components.insert(0, Component::Func { params, ret });
                break;
            }

            d if d.is_ascii_digit() => {
                // The digit opens a length-prefixed name nested inside the
                // chain; hand it back and re-enter through the numeric
                // production.
                input.set_position(input.position() - 1);
                let mut name = String::new();
                demangle_type(input, &mut name, depth + 1);
                components.insert(0, Component::Type(name));
                break;
            }

            _ => {
                if c != Cursor::SENTINEL {
                    log::trace!(
                        "unrecognized type code {:?} at position {}",
                        c,
                        input.position()
                    );
                }
                break;
            }
        }
    }

    render_components(&components, output);
}

/// Numeric production: an optional `-` and a digit run form an integer.
/// Followed by `,` or `>` (a generic-argument list) it is a literal
/// constant; otherwise it is the length of an identifier to copy, with any
/// `<` inside the copied span expanding as a template-argument list.
fn demangle_number(input: &mut Cursor, output: &mut String, depth: usize) {
    let mut literal = false;
    let mut negative = false;

    if input.peek() == '-' {
        input.read();
        negative = true;
        literal = true;
    }

    let mut length: u64 = 0;
    while input.peek().is_ascii_digit() {
        let digit = input.read().to_digit(10).unwrap_or(0);
        length = length.saturating_mul(10).saturating_add(u64::from(digit));
    }

    if input.peek() == ',' || input.peek() == '>' {
        literal = true;
    }

    if literal {
        if negative && length != 0 {
            output.push('-');
        }
        output.push_str(&length.to_string());
        return;
    }

    let length = usize::try_from(length).unwrap_or(usize::MAX);
    let start = input.position();
    while input.position() - start < length && !input.at_end() {
        let c = input.read();
        if c == '<' {
            demangle_template(input, output, depth + 1);
        } else {
            output.push(c);
        }
    }
}

/// Template-argument expansion, entered after a `<` has been consumed.
/// Arguments are type productions; a consumed `,` joins them with `, `,
/// and a consumed `>` or end of input closes the list.
pub(crate) fn demangle_template(input: &mut Cursor, output: &mut String, depth: usize) {
    output.push('<');
    loop {
        demangle_type(input, output, depth + 1);
        let c = input.read();
        if c == '>' || c == Cursor::SENTINEL {
            break;
        }
        if c == ',' {
            output.push_str(", ");
        }
    }
    output.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(encoded: &str) -> String {
        let mut input = Cursor::new(encoded);
        let mut output = String::new();
        demangle_type(&mut input, &mut output, 0);
        output
    }

    // --- Primitive and modifier chains ---

    #[test]
    fn test_primitives() {
        assert_eq!(decode("v"), "void");
        assert_eq!(decode("i"), "int");
        assert_eq!(decode("f"), "float");
        assert_eq!(decode("d"), "double");
    }

    #[test]
    fn test_pointer_stacking() {
        assert_eq!(decode("Pi"), "int *");
        assert_eq!(decode("PPi"), "int **");
        assert_eq!(decode("PPPi"), "int ***");
    }

    #[test]
    fn test_reference() {
        assert_eq!(decode("Ri"), "int &");
    }

    #[test]
    fn test_unsigned() {
        assert_eq!(decode("Ui"), "unsigned int");
        assert_eq!(decode("PUi"), "unsigned int *");
    }

    #[test]
    fn test_const_positions() {
        assert_eq!(decode("PCi"), "int const *");
        assert_eq!(decode("CPi"), "int * const");
    }

    // --- Length-prefixed names and literals ---

    #[test]
    fn test_length_prefixed_name() {
        assert_eq!(decode("8MyStruct"), "MyStruct");
        assert_eq!(decode("P8MyStruct"), "MyStruct *");
    }

    #[test]
    fn test_length_clamps_to_input() {
        assert_eq!(decode("9abc"), "abc");
    }

    #[test]
    fn test_literal_inside_template() {
        assert_eq!(decode("4Li<2,3>"), "Li<2, 3>");
        assert_eq!(decode("4Li<-5>"), "Li<-5>");
    }

    #[test]
    fn test_negative_zero_literal() {
        assert_eq!(decode("4Li<-0>"), "Li<0>");
    }

    #[test]
    fn test_template_with_type_arguments() {
        assert_eq!(decode("9Pair<i,i>"), "Pair<int, int>");
        assert_eq!(decode("8List<Pv>"), "List<void *>");
    }

    #[test]
    fn test_nested_template() {
        // The inner name's length span covers its own argument list.
        assert_eq!(decode("16Outer<8Inner<i>>"), "Outer<Inner<int>>");
    }

    // --- Qualified names ---

    #[test]
    fn test_scope_joining() {
        assert_eq!(decode("Q23Foo3Bar"), "Foo::Bar");
        assert_eq!(decode("Q33sys2io4File"), "sys::io::File");
    }

    #[test]
    fn test_pointer_to_qualified() {
        assert_eq!(decode("PQ23Foo3Bar"), "Foo::Bar *");
    }

    // --- Arrays ---

    #[test]
    fn test_array_dimensions_in_source_order() {
        assert_eq!(decode("A3_i"), "int [3]");
        assert_eq!(decode("A3_A4_i"), "int [3][4]");
    }

    #[test]
    fn test_pointer_to_array() {
        assert_eq!(decode("PA5_i"), "int (*) [5]");
    }

    #[test]
    fn test_truncated_array_dimension() {
        assert_eq!(decode("A3"), "[3]");
    }

    // --- Function types ---

    #[test]
    fn test_function_pointer() {
        assert_eq!(decode("PFi_v"), "void (*)(int)");
        assert_eq!(decode("PFiPi_v"), "void (*)(int, int *)");
    }

    #[test]
    fn test_function_void_params_collapse() {
        assert_eq!(decode("PFv_i"), "int (*)()");
    }

    // --- Degradation ---

    #[test]
    fn test_unrecognized_code_terminates() {
        assert_eq!(decode("z"), "");
        assert_eq!(decode("zi"), "");
    }

    #[test]
    fn test_modifiers_without_base() {
        assert_eq!(decode("PP"), "**");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode(""), "");
    }

    #[test]
    fn test_deep_nesting_fails_closed() {
        // 200 nested qualified-name productions blow past the depth cap;
        // the decode must return (with partial text) rather than overflow
        // the stack.
        let encoded: String = std::iter::repeat("Q2").take(200).collect();
        let _ = decode(&encoded);
    }

    #[test]
    fn test_every_iteration_consumes() {
        let mut input = Cursor::new("zzzz");
        let mut output = String::new();
        demangle_type(&mut input, &mut output, 0);
        assert_eq!(input.position(), 1);
    }
}
