error_chain! {
    foreign_links {
        Io(::std::io::Error);
        Toml(::toml::de::Error);
    }

    errors {
        InvalidSelector(name: String, css: String, reason: String) {
            description("A CSS selector in the selector table could not be parsed.")
            display("The selector `{}` ({}) could not be parsed: {}", name, css, reason)
        }

        MissingSelector(name: String) {
            description("A selector the scraper needs is missing from the selector table.")
            display("The selector table has no entry named `{}`", name)
        }

        Clipboard(reason: String) {
            description("Something went wrong while writing to the clipboard.")
            display("Could not write to the clipboard: {}", reason)
        }
    }
}
