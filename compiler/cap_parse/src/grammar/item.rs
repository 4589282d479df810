//! Definitions and imports.

use cap_ir::{FuncDef, Ident, ImportName, StmtKind, StructDef, TokenKind};

use super::BodyKind;
use crate::{ParseError, ParseResult, Parser};

impl Parser<'_> {
    /// `def name(params) [extends parent]: body end`, or `met` for a method.
    pub(crate) fn parse_func_def(&mut self) -> ParseResult<FuncDef> {
        let start = self.cursor.current_span();
        let is_method = match self.cursor.current_kind() {
            Some(TokenKind::Def) => false,
            Some(TokenKind::Met) => true,
            _ => return Ok(None),
        };
        self.cursor.advance();

        let Some(name) = self.cursor.eat_ident() else {
            return syntax_error!(self, "syntax error. not found identifier in func def");
        };
        let params = self.parse_params()?;
        if self.cursor.is_at_end() {
            return syntax_error!(self, "syntax error. reached EOF in parse func def");
        }

        let extends = if self.cursor.eat(&TokenKind::Extends) {
            let Some(parent) = self.cursor.eat_ident() else {
                return syntax_error!(self, "not found identifier in function extends");
            };
            Some(parent)
        } else {
            None
        };

        if !self.cursor.eat(&TokenKind::Colon) {
            return syntax_error!(self, "syntax error. not found colon in parse func def");
        }

        let outer = std::mem::replace(&mut self.in_def, true);
        let body = self.parse_body(BodyKind::Def);
        self.in_def = outer;
        let body = body?;
        self.cursor.advance();

        Ok(Some(FuncDef {
            name,
            params,
            extends,
            is_method,
            body,
            span: start.merge(self.cursor.previous_span()),
        }))
    }

    /// `( [ident ("," ident)*] )`
    fn parse_params(&mut self) -> Result<Vec<Ident>, ParseError> {
        if !self.cursor.eat(&TokenKind::LParen) {
            return syntax_error!(self, "syntax error. not found '(' in func def params");
        }
        let mut params = Vec::new();
        if let Some(first) = self.cursor.eat_ident() {
            params.push(first);
            while self.cursor.eat(&TokenKind::Comma) {
                let Some(param) = self.cursor.eat_ident() else {
                    return syntax_error!(self, "syntax error. not found identifier in func def args");
                };
                params.push(param);
            }
        }

        if self.cursor.is_at_end() {
            return syntax_error!(self, "syntax error. reached EOF in func def params");
        }
        if !self.cursor.eat(&TokenKind::RParen) {
            return syntax_error!(self, "syntax error. not found ')' in func def params");
        }
        Ok(params)
    }

    /// `struct Name [extends Parent]: elems end`
    pub(crate) fn parse_struct(&mut self) -> ParseResult<StructDef> {
        let start = self.cursor.current_span();
        if !self.cursor.eat(&TokenKind::Struct) {
            return Ok(None);
        }
        let Some(name) = self.cursor.eat_ident() else {
            return syntax_error!(self, "not found identifier");
        };
        let extends = if self.cursor.eat(&TokenKind::Extends) {
            let Some(parent) = self.cursor.eat_ident() else {
                return syntax_error!(self, "not found identifier in struct extends");
            };
            Some(parent)
        } else {
            None
        };
        if !self.cursor.eat(&TokenKind::Colon) {
            return syntax_error!(self, "not found colon in struct");
        }

        self.cursor.skip_newlines();
        // Struct bodies are not function bodies even inside a `def`.
        let outer = std::mem::replace(&mut self.in_def, false);
        let elems = self.parse_elems();
        self.in_def = outer;
        let elems = elems?;
        self.cursor.skip_newlines();

        if !self.cursor.eat(&TokenKind::End) {
            return syntax_error!(self, "not found 'end' in struct");
        }
        Ok(Some(StructDef {
            name,
            extends,
            elems,
            span: start.merge(self.cursor.previous_span()),
        }))
    }

    /// `import "path" as alias`
    pub(crate) fn parse_import_as(&mut self) -> Result<StmtKind, ParseError> {
        const EOF: &str = "reached EOF in compile import as statement";
        self.cursor.advance();

        let Some(path) = self.parse_import_path()? else {
            return syntax_error!(self, "not found path in compile import as statement");
        };
        if self.cursor.is_at_end() {
            return syntax_error!(self, EOF);
        }
        if !self.cursor.eat(&TokenKind::As) {
            return syntax_error!(self, "not found keyword 'as' in compile import as statement");
        }
        if self.cursor.is_at_end() {
            return syntax_error!(self, EOF);
        }
        let Some(alias) = self.cursor.eat_ident() else {
            return syntax_error!(self, "not found alias in compile import as statement");
        };

        self.expect_import_end()?;
        Ok(StmtKind::Import { path, alias })
    }

    /// `from "path" import name [as alias]` or the parenthesized list form.
    pub(crate) fn parse_from_import(&mut self) -> Result<StmtKind, ParseError> {
        self.cursor.advance();

        let Some(path) = self.parse_import_path()? else {
            return syntax_error!(self, "not found path in compile from import statement");
        };
        if !self.cursor.eat(&TokenKind::Import) {
            return syntax_error!(self, "not found import in compile from import statement");
        }

        let names = if self.cursor.eat(&TokenKind::LParen) {
            self.parse_import_names()?
        } else if let Some(name) = self.parse_import_name()? {
            vec![name]
        } else {
            return syntax_error!(
                self,
                "not found import variables in compile from import statement"
            );
        };

        self.expect_import_end()?;
        Ok(StmtKind::FromImport { path, names })
    }

    /// The string literal naming an import. `Ok(None)` when absent; an
    /// error at end of input.
    fn parse_import_path(&mut self) -> ParseResult<String> {
        match self.cursor.current_kind() {
            None => syntax_error!(self, "reached EOF in compile import statement"),
            Some(TokenKind::Str(path)) => {
                self.cursor.advance();
                Ok(Some(path.clone()))
            }
            Some(_) => Ok(None),
        }
    }

    /// `name [as alias]`
    fn parse_import_name(&mut self) -> ParseResult<ImportName> {
        let Some(name) = self.cursor.eat_ident() else {
            return Ok(None);
        };
        let alias = if self.cursor.eat(&TokenKind::As) {
            let Some(alias) = self.cursor.eat_ident() else {
                return syntax_error!(
                    self,
                    "not found second identifier in compile import variable"
                );
            };
            Some(alias)
        } else {
            None
        };
        Ok(Some(ImportName { name, alias }))
    }

    /// `name [as alias] ("," name [as alias])* [","] )` after the `(`.
    fn parse_import_names(&mut self) -> Result<Vec<ImportName>, ParseError> {
        let mut names = Vec::new();
        loop {
            self.cursor.skip_newlines();
            if !names.is_empty() && self.cursor.eat(&TokenKind::RParen) {
                return Ok(names);
            }
            let Some(name) = self.parse_import_name()? else {
                return syntax_error!(self, "not found import variable in compile import variables");
            };
            names.push(name);

            self.cursor.skip_newlines();
            match self.cursor.current_kind() {
                Some(TokenKind::Comma) => {
                    self.cursor.advance();
                }
                Some(TokenKind::RParen) => {
                    self.cursor.advance();
                    return Ok(names);
                }
                None => return syntax_error!(self, "reached EOF in compile import variables"),
                Some(other) => {
                    return syntax_error!(
                        self,
                        format!(
                            "invalid token {} in compile import variables",
                            other.display_name()
                        )
                    );
                }
            }
        }
    }

    /// An import must end its line or the code region. The terminator is
    /// left for the caller.
    fn expect_import_end(&mut self) -> Result<(), ParseError> {
        match self.cursor.current_kind() {
            Some(TokenKind::Newline | TokenKind::StmtClose) => Ok(()),
            None => syntax_error!(self, "reached EOF in compile import statement"),
            Some(other) => syntax_error!(
                self,
                format!(
                    "syntax error. invalid token {} in compile import statement",
                    other.display_name()
                )
            ),
        }
    }
}
