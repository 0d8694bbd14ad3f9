// Copyright Materialize, Inc. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository, or online at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![cfg(feature = "serde")]

use serde_test::{assert_tokens, Token};

use bigdec::Numeric;

#[test]
fn test_serde() {
    let d: Numeric = "-12.34".parse().unwrap();
    assert_tokens(&d, &[Token::Str("-12.34")]);

    // The display scale survives the round trip.
    let d: Numeric = "1.200".parse().unwrap();
    assert_tokens(&d, &[Token::Str("1.200")]);

    let d: Numeric = "NaN".parse().unwrap();
    assert_tokens(&d, &[Token::Str("NaN")]);
}
