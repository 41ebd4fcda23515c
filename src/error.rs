/*!
Provides the crate's `Error`, `ErrorKind`, and `Result` types.

Every failing operation in this crate reports one of the kinds below; parsers
and validators never mutate their target on failure, and none of them panic on
malformed input.

*/

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// Names the URL component an error refers to.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Component {
    Scheme,
    Authority,
    UserInfo,
    Host,
    Port,
    Path,
    Query,
    Fragment,
}

error_chain! {
    errors {
        #[doc = "A URL cannot be constructed from the empty string."]
        IsEmpty {
            description("A URL cannot be constructed from the empty string.")
            display("A URL cannot be constructed from the empty string.")
        }
        #[doc = "The input does not conform to the requested grammar production."]
        Syntax(c: Component, at: usize) {
            description("The input does not conform to the requested grammar production.")
            display("Invalid {:?} component syntax at byte offset {}.", c, at)
        }
        #[doc = "A `%` not followed by two hex digits, or a byte outside the allowed set."]
        InvalidPercentEncoding(at: usize) {
            description("A `%` not followed by two hex digits, or a byte outside the allowed set.")
            display("Invalid percent-encoding at byte offset {}.", at)
        }
        #[doc = "A bracketed host is not a valid IPv6 address or IPvFuture literal."]
        InvalidIpLiteral {
            description("A bracketed host is not a valid IPv6 address or IPvFuture literal.")
            display("A bracketed host is not a valid IPv6 address or IPvFuture literal.")
        }
        #[doc = "A dotted-quad sequence has a malformed octet."]
        InvalidIpv4 {
            description("A dotted-quad sequence has a malformed octet.")
            display("A dotted-quad sequence has a malformed octet.")
        }
        #[doc = "A numeric component exceeds its range."]
        Overflow {
            description("A numeric component exceeds its range.")
            display("A numeric component exceeds its range.")
        }
        #[doc = "Reference resolution requires a base URL with a scheme."]
        NotABase {
            description("Reference resolution requires a base URL with a scheme.")
            display("Reference resolution requires a base URL with a scheme.")
        }
        #[doc = "Indexed access beyond the size of a segments or params collection."]
        OutOfRange(index: usize, len: usize) {
            description("Indexed access beyond the size of a segments or params collection.")
            display("Index {} is out of range for a collection of size {}.", index, len)
        }
        #[doc = "An argument value is outside the meaningful subset for the operation."]
        InvalidArgument(reason: String) {
            description("An argument value is outside the meaningful subset for the operation.")
            display("Invalid argument: {}.", reason)
        }
    }
}
