/* Licensed to the Apache Software Foundation (ASF) under one
 * or more contributor license agreements.  See the NOTICE file
 * distributed with this work for additional information
 * regarding copyright ownership.  The ASF licenses this file
 * to you under the Apache License, Version 2.0 (the
 * "License"); you may not use this file except in compliance
 * with the License.  You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing,
 * software distributed under the License is distributed on an
 * "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
 * KIND, either express or implied.  See the License for the
 * specific language governing permissions and limitations
 * under the License.
 */

use nonzero_lit::u32;
use std::num::NonZeroU32;

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_QUERY_PATH: &str = "/query";
pub const DEFAULT_QUERY_PARAM: &str = "terms";

pub const DEFAULT_SAMPLES: u64 = 10;
pub const DEFAULT_CONCURRENCY: NonZeroU32 = u32!(4);
pub const DEFAULT_PARALLEL_POINTS: NonZeroU32 = u32!(1);

pub const DEFAULT_REQUEST_TIMEOUT: &str = "5s";
pub const DEFAULT_CONNECT_TIMEOUT: &str = "2s";

pub const DEFAULT_LOG_LEVEL: &str = "info";
